use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::income::total_monthly_income;
use crate::property::PropertyRecord;
use crate::types::{sum_items, Money, Percent};

/// Monthly operating expenses by component.
///
/// Leasing fees and replacement reserves are carried on the record but are
/// not part of the recurring monthly total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    pub property_taxes: Money,
    pub property_insurance: Money,
    pub hoa: Money,
    pub water: Money,
    pub gas: Money,
    pub electricity: Money,
    pub landscaping_snow_removal: Money,
    pub internet: Money,
    pub security: Money,
    pub administrative_management: Money,
    pub repairs_maintenance: Money,
    pub property_management: Money,
    pub custom: Money,
}

impl ExpenseBreakdown {
    pub fn total(&self) -> Money {
        self.fixed_total() + self.repairs_maintenance + self.property_management + self.custom
    }

    /// Everything not quoted as a percentage of income.
    pub fn income_independent_total(&self) -> Money {
        self.fixed_total() + self.custom
    }

    /// Taxes, insurance and the fixed monthly bills.
    pub fn fixed_total(&self) -> Money {
        self.property_taxes
            + self.property_insurance
            + self.hoa
            + self.water
            + self.gas
            + self.electricity
            + self.landscaping_snow_removal
            + self.internet
            + self.security
            + self.administrative_management
    }
}

/// Expense quoted as a percentage of the current gross monthly income.
pub fn percentage_expense(record: &PropertyRecord, pct: Percent) -> Money {
    total_monthly_income(record) * pct / Decimal::ONE_HUNDRED
}

pub fn expense_breakdown(record: &PropertyRecord) -> ExpenseBreakdown {
    let e = &record.expenses;
    let twelve = Decimal::from(12);

    ExpenseBreakdown {
        property_taxes: e.annual_property_taxes / twelve,
        property_insurance: e.annual_property_insurance / twelve,
        hoa: e.hoa,
        water: e.water,
        gas: e.gas,
        electricity: e.electricity,
        landscaping_snow_removal: e.landscaping_snow_removal,
        internet: e.internet,
        security: e.security,
        administrative_management: e.administrative_management,
        repairs_maintenance: percentage_expense(record, e.repairs_maintenance_percentage),
        property_management: percentage_expense(record, e.property_management_percentage),
        custom: sum_items(&e.custom_expenses),
    }
}

/// Recurring monthly operating expenses, excluding debt service.
pub fn total_monthly_expenses(record: &PropertyRecord) -> Money {
    expense_breakdown(record).total()
}

/// Expenses paid once at acquisition.
pub fn total_one_time_expenses(record: &PropertyRecord) -> Money {
    sum_items(&record.expenses.one_time_expenses)
}
