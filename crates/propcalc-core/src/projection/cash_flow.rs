use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::options::{DebtServiceGrowth, PercentageExpenseBasis, ProjectionOptions};
use crate::financing::loan::monthly_payment;
use crate::operating::expenses::expense_breakdown;
use crate::operating::income::total_monthly_income;
use crate::property::PropertyRecord;
use crate::time_value::growth_factor;
use crate::types::Money;

/// One projected holding year. Monthly figures are that year's run rate;
/// expenses include debt service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyCashFlow {
    pub year: u32,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
}

/// Year-by-year cash flow with debt service compounded alongside expenses.
pub fn project_cash_flows(record: &PropertyRecord) -> Vec<YearlyCashFlow> {
    project_cash_flows_with(record, &ProjectionOptions::default())
}

/// Year-by-year cash flow over the holding period.
///
/// Year 1 uses today's income and expenses; each later year compounds rent
/// by the rent growth rate and expenses by the expense growth rate. With
/// `PercentageExpenseBasis::ProjectedIncome` the repairs and management
/// percentages follow that year's income instead of the expense rate.
pub fn project_cash_flows_with(
    record: &PropertyRecord,
    options: &ProjectionOptions,
) -> Vec<YearlyCashFlow> {
    let base_income = total_monthly_income(record);
    let breakdown = expense_breakdown(record);
    let income_linked_pct = record.expenses.repairs_maintenance_percentage
        + record.expenses.property_management_percentage;
    let operating = match options.percentage_expenses {
        PercentageExpenseBasis::BaseYear => breakdown.total(),
        PercentageExpenseBasis::ProjectedIncome => breakdown.income_independent_total(),
    };
    let debt_service = monthly_payment(record);
    let twelve = Decimal::from(12);

    (1..=record.hold_period)
        .map(|year| {
            let rent_factor = growth_factor(record.projected_rent_growth, year - 1);
            let expense_factor = growth_factor(record.expense_growth_rate, year - 1);

            let monthly_income = base_income.saturating_mul(rent_factor);
            let income_linked = match options.percentage_expenses {
                PercentageExpenseBasis::BaseYear => Decimal::ZERO,
                PercentageExpenseBasis::ProjectedIncome => {
                    (monthly_income / Decimal::ONE_HUNDRED).saturating_mul(income_linked_pct)
                }
            };
            let monthly_expenses = match options.debt_service {
                DebtServiceGrowth::Compounded => operating
                    .saturating_add(debt_service)
                    .saturating_mul(expense_factor),
                DebtServiceGrowth::Fixed => operating
                    .saturating_mul(expense_factor)
                    .saturating_add(debt_service),
            }
            .saturating_add(income_linked);
            let monthly_cash_flow = monthly_income - monthly_expenses;

            YearlyCashFlow {
                year,
                monthly_income,
                monthly_expenses,
                monthly_cash_flow,
                annual_cash_flow: monthly_cash_flow.saturating_mul(twelve),
            }
        })
        .collect()
}

pub fn annual_cash_flows(series: &[YearlyCashFlow]) -> Vec<Money> {
    series.iter().map(|cf| cf.annual_cash_flow).collect()
}
