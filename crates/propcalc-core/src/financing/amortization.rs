use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::loan::{loan_amount, monthly_payment, monthly_rate, total_payments};
use crate::property::PropertyRecord;
use crate::types::Money;

/// Balances at or below this are treated as repaid.
const PAID_OFF_THRESHOLD: Money = dec!(0.01);

/// Loan position at the end of a holding year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanYearBalance {
    pub year: u32,
    pub remaining_balance: Money,
    pub yearly_principal_paid: Money,
    pub yearly_interest_paid: Money,
}

/// Month-by-month amortization rolled up to year ends over the holding period.
///
/// Payments stop at the end of the loan term or once the balance is repaid;
/// later years report a zero balance and nothing paid. No loan, a negative
/// rate or a zero term produce an empty schedule.
pub fn amortization_schedule(record: &PropertyRecord) -> Vec<LoanYearBalance> {
    let principal = loan_amount(record);
    let rate = monthly_rate(record);
    let payments = total_payments(record);

    if principal <= Decimal::ZERO || rate < Decimal::ZERO || payments == 0 {
        return Vec::new();
    }

    let payment = monthly_payment(record);
    let mut balance = principal;
    let mut months_paid: u32 = 0;
    let mut schedule = Vec::with_capacity(record.hold_period as usize);

    for year in 1..=record.hold_period {
        let mut principal_paid = Decimal::ZERO;
        let mut interest_paid = Decimal::ZERO;

        for _ in 0..12 {
            if months_paid >= payments || balance.is_zero() {
                break;
            }

            let interest = balance.saturating_mul(rate);
            let principal_portion = payment.saturating_sub(interest).min(balance);
            balance -= principal_portion;
            principal_paid += principal_portion;
            interest_paid = interest_paid.saturating_add(interest);
            months_paid += 1;

            if balance <= PAID_OFF_THRESHOLD {
                // Final payment clears the rounding residue.
                principal_paid += balance;
                balance = Decimal::ZERO;
            }
        }

        schedule.push(LoanYearBalance {
            year,
            remaining_balance: balance,
            yearly_principal_paid: principal_paid,
            yearly_interest_paid: interest_paid,
        });
    }

    schedule
}

/// Balance outstanding at the end of `year`, if the schedule covers it.
pub fn balance_at_year(schedule: &[LoanYearBalance], year: u32) -> Option<Money> {
    if year == 0 {
        return None;
    }
    schedule
        .iter()
        .find(|row| row.year == year)
        .map(|row| row.remaining_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{DownPaymentType, Finance};
    use rust_decimal_macros::dec;

    fn mortgage(rate: Decimal, term: u32, hold: u32) -> PropertyRecord {
        PropertyRecord {
            purchase_price: dec!(300000),
            finance: Finance {
                down_payment: dec!(25),
                down_payment_type: DownPaymentType::Percentage,
                interest_rate: rate,
                loan_term: term,
                ..Finance::default()
            },
            hold_period: hold,
            ..PropertyRecord::default()
        }
    }

    #[test]
    fn test_first_year_split() {
        let schedule = amortization_schedule(&mortgage(dec!(6), 30, 5));
        assert_eq!(schedule.len(), 5);

        let y1 = &schedule[0];
        assert_eq!(y1.year, 1);
        // Year 1 on 225k @ 6%: ~2,763 principal, ~13,425 interest
        assert!((y1.yearly_principal_paid - dec!(2763)).abs() < dec!(5));
        assert!((y1.yearly_interest_paid - dec!(13425)).abs() < dec!(5));
        let expected = dec!(225000) - y1.yearly_principal_paid;
        assert!((y1.remaining_balance - expected).abs() < dec!(0.000001));
    }

    #[test]
    fn test_balance_declines_every_year() {
        let schedule = amortization_schedule(&mortgage(dec!(6), 30, 10));
        for pair in schedule.windows(2) {
            assert!(pair[1].remaining_balance < pair[0].remaining_balance);
        }
    }

    #[test]
    fn test_paid_off_mid_projection() {
        let schedule = amortization_schedule(&mortgage(dec!(5), 3, 5));
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule[2].remaining_balance, Decimal::ZERO);
        for row in &schedule[3..] {
            assert_eq!(row.remaining_balance, Decimal::ZERO);
            assert_eq!(row.yearly_principal_paid, Decimal::ZERO);
            assert_eq!(row.yearly_interest_paid, Decimal::ZERO);
        }
        let principal: Decimal = schedule.iter().map(|r| r.yearly_principal_paid).sum();
        assert!((principal - dec!(225000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_interest_schedule() {
        let schedule = amortization_schedule(&mortgage(Decimal::ZERO, 10, 2));
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].yearly_interest_paid, Decimal::ZERO);
        assert_eq!(schedule[0].yearly_principal_paid, dec!(22500));
        assert_eq!(schedule[1].remaining_balance, dec!(180000));
    }

    #[test]
    fn test_degenerate_loans_have_empty_schedule() {
        let mut cash = mortgage(dec!(6), 30, 5);
        cash.finance.down_payment = dec!(100);
        assert!(amortization_schedule(&cash).is_empty());

        let no_term = mortgage(dec!(6), 0, 5);
        assert!(amortization_schedule(&no_term).is_empty());

        let negative_rate = mortgage(dec!(-1), 30, 5);
        assert!(amortization_schedule(&negative_rate).is_empty());
    }

    #[test]
    fn test_balance_at_year() {
        let schedule = amortization_schedule(&mortgage(dec!(6), 30, 3));
        assert_eq!(
            balance_at_year(&schedule, 2),
            Some(schedule[1].remaining_balance)
        );
        assert_eq!(balance_at_year(&schedule, 0), None);
        assert_eq!(balance_at_year(&schedule, 4), None);
    }
}
