use rust_decimal::Decimal;

use crate::property::PropertyRecord;
use crate::time_value::level_payment;
use crate::types::{Money, Rate};

pub fn down_payment_amount(record: &PropertyRecord) -> Money {
    record
        .finance
        .down_payment_type
        .resolve(record.purchase_price, record.finance.down_payment)
}

/// Financed amount; never negative.
pub fn loan_amount(record: &PropertyRecord) -> Money {
    if record.purchase_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (record.purchase_price - down_payment_amount(record)).max(Decimal::ZERO)
}

/// Annual interest rate / 100 / 12.
pub fn monthly_rate(record: &PropertyRecord) -> Rate {
    record.finance.interest_rate / Decimal::ONE_HUNDRED / Decimal::from(12)
}

/// Number of scheduled payments over the loan term.
pub fn total_payments(record: &PropertyRecord) -> u32 {
    record.finance.loan_term.saturating_mul(12)
}

/// Fixed-rate fully-amortizing monthly principal and interest.
///
/// Zero-interest loans amortize straight-line over the term.
pub fn monthly_payment(record: &PropertyRecord) -> Money {
    level_payment(loan_amount(record), monthly_rate(record), total_payments(record))
}

pub fn points_amount(record: &PropertyRecord) -> Money {
    loan_amount(record) * record.finance.points / Decimal::ONE_HUNDRED
}
