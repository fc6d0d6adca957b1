use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rehab::{LostRevenueSchedule, LostRevenueYear};
use crate::types::{LineItem, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    #[serde(alias = "Single Family Home")]
    SingleFamily,
    MultiFamily,
    Condo,
    Townhouse,
}

/// How `Finance::down_payment` is to be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPaymentType {
    /// Percent of the purchase price (25 = 25%)
    #[default]
    Percentage,
    /// Absolute cash amount
    Amount,
}

impl DownPaymentType {
    /// Cash down payment implied by `down_payment` under this convention.
    /// Zero when either the price or the down payment is unset.
    pub fn resolve(self, purchase_price: Money, down_payment: Decimal) -> Money {
        if purchase_price.is_zero() || down_payment.is_zero() {
            return Decimal::ZERO;
        }
        match self {
            DownPaymentType::Percentage => purchase_price * down_payment / Decimal::ONE_HUNDRED,
            DownPaymentType::Amount => down_payment,
        }
    }
}

/// A rentable unit type. `number_of_units` identical units share the rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    pub monthly_rent: Money,
    pub number_of_units: u32,
    pub beds: u32,
    pub baths: Decimal,
    pub sqft: u32,
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            monthly_rent: Decimal::ZERO,
            number_of_units: 1,
            beds: 1,
            baths: Decimal::ONE,
            sqft: 0,
        }
    }
}

impl Unit {
    pub fn with_rent(monthly_rent: Money, number_of_units: u32) -> Self {
        Self {
            monthly_rent,
            number_of_units,
            ..Self::default()
        }
    }
}

/// Fixed-rate, fully-amortizing acquisition financing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finance {
    pub down_payment: Decimal,
    pub down_payment_type: DownPaymentType,
    /// Annual interest rate in percent
    pub interest_rate: Percent,
    /// Loan term in years
    pub loan_term: u32,
    pub closing_costs: Money,
    /// Points in percent of the loan amount
    pub points: Percent,
    pub other_costs: Money,
}

/// Operating expenses. Fixed items are monthly unless named annual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expenses {
    pub annual_property_taxes: Money,
    pub annual_property_insurance: Money,
    pub hoa: Money,
    pub water: Money,
    pub gas: Money,
    pub electricity: Money,
    pub landscaping_snow_removal: Money,
    pub internet: Money,
    pub security: Money,
    pub administrative_management: Money,
    pub repairs_maintenance_percentage: Percent,
    pub property_management_percentage: Percent,
    pub leasing_fee: Money,
    pub replacement_reserves: Money,
    pub custom_expenses: Vec<LineItem>,
    pub one_time_expenses: Vec<LineItem>,
}

/// Development / rehab budget incurred before stabilisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rehab {
    pub hard_costs: Vec<LineItem>,
    pub soft_costs: Vec<LineItem>,
    pub lost_revenue_and_costs: Vec<LostRevenueYear>,
}

/// The complete set of inputs for one calculation pass.
///
/// Missing fields deserialize to zero, except the growth and analysis
/// parameters which take the property form's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyRecord {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub purchase_price: Money,
    pub property_type: PropertyType,
    pub units: Vec<Unit>,
    pub other_income: Vec<LineItem>,
    pub finance: Finance,
    pub expenses: Expenses,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rehab: Option<Rehab>,
    /// Annual rent growth in percent
    pub projected_rent_growth: Percent,
    /// Annual expense growth in percent
    pub expense_growth_rate: Percent,
    /// Annual property appreciation in percent
    pub appreciation_rate: Percent,
    /// Holding period in whole years
    pub hold_period: u32,
    pub vacancy_rate: Percent,
    /// Average lease length in months
    pub average_lease_length: Decimal,
}

impl Default for PropertyRecord {
    fn default() -> Self {
        Self {
            address: String::new(),
            nickname: None,
            purchase_price: Decimal::ZERO,
            property_type: PropertyType::default(),
            units: vec![Unit::default()],
            other_income: Vec::new(),
            finance: Finance::default(),
            expenses: Expenses::default(),
            rehab: None,
            projected_rent_growth: dec!(2),
            expense_growth_rate: dec!(3),
            appreciation_rate: dec!(2),
            hold_period: 5,
            vacancy_rate: dec!(5),
            average_lease_length: dec!(12),
        }
    }
}

impl PropertyRecord {
    pub fn hard_costs(&self) -> &[LineItem] {
        self.rehab
            .as_ref()
            .map(|r| r.hard_costs.as_slice())
            .unwrap_or_default()
    }

    pub fn soft_costs(&self) -> &[LineItem] {
        self.rehab
            .as_ref()
            .map(|r| r.soft_costs.as_slice())
            .unwrap_or_default()
    }

    pub fn lost_revenue_entries(&self) -> &[LostRevenueYear] {
        self.rehab
            .as_ref()
            .map(|r| r.lost_revenue_and_costs.as_slice())
            .unwrap_or_default()
    }

    /// Rehab-period lost revenue folded into one amount per holding year.
    pub fn lost_revenue_schedule(&self) -> LostRevenueSchedule {
        LostRevenueSchedule::from_entries(self.lost_revenue_entries(), self.hold_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_down_payment() {
        let dp = DownPaymentType::Percentage.resolve(dec!(300000), dec!(25));
        assert_eq!(dp, dec!(75000));
    }

    #[test]
    fn test_amount_down_payment() {
        let dp = DownPaymentType::Amount.resolve(dec!(300000), dec!(75000));
        assert_eq!(dp, dec!(75000));
    }

    #[test]
    fn test_down_payment_unset_price_or_amount() {
        assert_eq!(
            DownPaymentType::Percentage.resolve(Decimal::ZERO, dec!(25)),
            Decimal::ZERO
        );
        assert_eq!(
            DownPaymentType::Amount.resolve(dec!(300000), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_minimal_json_takes_form_defaults() {
        let json = r#"{
            "purchase_price": "250000",
            "units": [{ "monthly_rent": 1800 }]
        }"#;
        let record: PropertyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.purchase_price, dec!(250000));
        assert_eq!(record.units[0].number_of_units, 1);
        assert_eq!(record.hold_period, 5);
        assert_eq!(record.vacancy_rate, dec!(5));
        assert_eq!(record.expense_growth_rate, dec!(3));
        assert_eq!(record.appreciation_rate, dec!(2));
        assert_eq!(record.finance.down_payment_type, DownPaymentType::Percentage);
        assert!(record.rehab.is_none());
    }

    #[test]
    fn test_property_type_accepts_form_label() {
        let t: PropertyType = serde_json::from_str(r#""Single Family Home""#).unwrap();
        assert_eq!(t, PropertyType::SingleFamily);
        let t: PropertyType = serde_json::from_str(r#""MultiFamily""#).unwrap();
        assert_eq!(t, PropertyType::MultiFamily);
    }

    #[test]
    fn test_rehab_accessors_without_rehab() {
        let record = PropertyRecord::default();
        assert!(record.hard_costs().is_empty());
        assert!(record.soft_costs().is_empty());
        assert!(record.lost_revenue_entries().is_empty());
        assert_eq!(record.lost_revenue_schedule().total(), Decimal::ZERO);
    }
}
