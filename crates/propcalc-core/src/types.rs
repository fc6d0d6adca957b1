use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Percentages as entered on the property form (5 = 5%).
pub type Percent = Decimal;

/// A named amount: other income, custom expenses, rehab costs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: Money,
}

impl LineItem {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// Sum of the amounts of a list of line items.
pub fn sum_items(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.amount).sum()
}

/// Sum that pins at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn saturating_sum(values: &[Money]) -> Money {
    values
        .iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(*value))
}

/// `part / whole * 100`, saturating when the ratio leaves the Decimal range.
/// Zero when `whole` is zero.
pub fn percent_of(part: Money, whole: Money) -> Percent {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() == whole.is_sign_negative() => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Convert a form percentage into a decimal rate.
pub fn pct_to_rate(pct: Percent) -> Rate {
    pct / Decimal::ONE_HUNDRED
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sum_items() {
        let items = vec![
            LineItem::new("Parking", dec!(150)),
            LineItem::new("Laundry", dec!(75.50)),
        ];
        assert_eq!(sum_items(&items), dec!(225.50));
        assert_eq!(sum_items(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_saturating_sum_pins_at_max() {
        assert_eq!(saturating_sum(&[dec!(1), dec!(2.5)]), dec!(3.5));
        assert_eq!(saturating_sum(&[Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum(&[Decimal::MAX, dec!(-1)]), Decimal::MAX - dec!(1));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(24000), dec!(200000)), dec!(12));
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(Decimal::MAX, dec!(2)), Decimal::MAX);
        assert_eq!(percent_of(Decimal::MAX, dec!(0.001)), Decimal::MAX);
        assert_eq!(percent_of(Decimal::MIN, dec!(0.001)), Decimal::MIN);
    }

    #[test]
    fn test_pct_to_rate() {
        assert_eq!(pct_to_rate(dec!(6)), dec!(0.06));
    }

    #[test]
    fn test_line_item_amount_defaults_to_zero() {
        let item: LineItem = serde_json::from_str(r#"{"category": "Storage"}"#).unwrap();
        assert_eq!(item.amount, Decimal::ZERO);
    }
}
