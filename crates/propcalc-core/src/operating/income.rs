use rust_decimal::Decimal;

use crate::property::PropertyRecord;
use crate::types::{pct_to_rate, sum_items, Money};

/// Scheduled rent across all units: sum of rent * unit count.
pub fn unit_rent_income(record: &PropertyRecord) -> Money {
    record
        .units
        .iter()
        .map(|u| u.monthly_rent * Decimal::from(u.number_of_units))
        .sum()
}

/// Recurring non-rent income (parking, laundry, storage...).
pub fn other_income_total(record: &PropertyRecord) -> Money {
    sum_items(&record.other_income)
}

/// Gross scheduled monthly income.
pub fn total_monthly_income(record: &PropertyRecord) -> Money {
    unit_rent_income(record) + other_income_total(record)
}

/// Monthly income after the vacancy allowance. Not used by the projectors.
pub fn effective_monthly_income(record: &PropertyRecord) -> Money {
    total_monthly_income(record) * (Decimal::ONE - pct_to_rate(record.vacancy_rate))
}
