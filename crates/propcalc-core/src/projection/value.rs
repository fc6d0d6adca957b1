use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::options::ProjectionOptions;
use crate::financing::amortization::{amortization_schedule, balance_at_year, LoanYearBalance};
use crate::financing::loan::loan_amount;
use crate::property::PropertyRecord;
use crate::time_value::growth_factor;
use crate::types::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValueYear {
    pub year: u32,
    pub property_value: Money,
}

/// Proceeds from a sale at the end of `year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetProceedsYear {
    pub year: u32,
    pub sale_price: Money,
    pub remaining_loan: Money,
    pub selling_costs: Money,
    pub net_proceeds: Money,
}

/// Market value at the end of `year`: price * (1 + appreciation)^year.
///
/// Year 1 already carries a full year of appreciation, unlike the cash-flow
/// projection where year 1 is unscaled.
pub fn property_value(record: &PropertyRecord, year: u32) -> Money {
    record
        .purchase_price
        .saturating_mul(growth_factor(record.appreciation_rate, year))
}

pub fn project_property_values(record: &PropertyRecord) -> Vec<PropertyValueYear> {
    (1..=record.hold_period)
        .map(|year| PropertyValueYear {
            year,
            property_value: property_value(record, year),
        })
        .collect()
}

/// Net sale proceeds per holding year with the default 7% selling costs.
pub fn project_net_proceeds(record: &PropertyRecord) -> Vec<NetProceedsYear> {
    let schedule = amortization_schedule(record);
    project_net_proceeds_with(record, &schedule, &ProjectionOptions::default())
}

/// Net sale proceeds per holding year against a precomputed loan schedule.
///
/// A debt-free purchase sells unencumbered in every year. Otherwise the
/// series stops where the loan schedule stops.
pub fn project_net_proceeds_with(
    record: &PropertyRecord,
    schedule: &[LoanYearBalance],
    options: &ProjectionOptions,
) -> Vec<NetProceedsYear> {
    let debt_free = loan_amount(record) <= Decimal::ZERO;
    let values = project_property_values(record);
    let years = if debt_free {
        values.len()
    } else {
        values.len().min(schedule.len())
    };

    values
        .into_iter()
        .take(years)
        .map(|pv| {
            let remaining_loan = if debt_free {
                Decimal::ZERO
            } else {
                balance_at_year(schedule, pv.year).unwrap_or(Decimal::ZERO)
            };
            let selling_costs = (pv.property_value / Decimal::ONE_HUNDRED)
                .saturating_mul(options.selling_cost_rate);
            NetProceedsYear {
                year: pv.year,
                sale_price: pv.property_value,
                remaining_loan,
                selling_costs,
                net_proceeds: pv
                    .property_value
                    .saturating_sub(remaining_loan)
                    .saturating_sub(selling_costs),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{DownPaymentType, Finance};
    use rust_decimal_macros::dec;

    fn levered(hold: u32) -> PropertyRecord {
        PropertyRecord {
            purchase_price: dec!(300000),
            appreciation_rate: dec!(3),
            hold_period: hold,
            finance: Finance {
                down_payment: dec!(25),
                down_payment_type: DownPaymentType::Percentage,
                interest_rate: dec!(6),
                loan_term: 30,
                ..Finance::default()
            },
            ..PropertyRecord::default()
        }
    }

    #[test]
    fn test_year_one_includes_appreciation() {
        let record = levered(5);
        assert_eq!(property_value(&record, 1), dec!(309000));
        assert_eq!(property_value(&record, 0), dec!(300000));
    }

    #[test]
    fn test_values_strictly_increase() {
        let values = project_property_values(&levered(10));
        assert_eq!(values.len(), 10);
        for pair in values.windows(2) {
            assert!(pair[1].property_value > pair[0].property_value);
        }
    }

    #[test]
    fn test_net_proceeds_nets_loan_and_selling_costs() {
        let record = levered(5);
        let schedule = amortization_schedule(&record);
        let proceeds = project_net_proceeds(&record);
        assert_eq!(proceeds.len(), 5);

        let y1 = &proceeds[0];
        assert_eq!(y1.sale_price, dec!(309000));
        assert_eq!(y1.selling_costs, dec!(21630));
        assert_eq!(y1.remaining_loan, schedule[0].remaining_balance);
        assert_eq!(
            y1.net_proceeds,
            dec!(309000) - schedule[0].remaining_balance - dec!(21630)
        );
    }

    #[test]
    fn test_debt_free_purchase_sells_unencumbered() {
        let mut record = levered(3);
        record.finance.down_payment = dec!(100);
        let proceeds = project_net_proceeds(&record);
        assert_eq!(proceeds.len(), 3);
        assert!(proceeds.iter().all(|p| p.remaining_loan.is_zero()));
        assert_eq!(proceeds[0].net_proceeds, dec!(309000) * dec!(0.93));
    }

    #[test]
    fn test_clamped_to_shorter_schedule() {
        let record = levered(5);
        let schedule = amortization_schedule(&record);
        let proceeds =
            project_net_proceeds_with(&record, &schedule[..2], &ProjectionOptions::default());
        assert_eq!(proceeds.len(), 2);
    }

    #[test]
    fn test_custom_selling_cost_rate() {
        let mut record = levered(1);
        record.finance.down_payment = dec!(100);
        let opts = ProjectionOptions {
            selling_cost_rate: dec!(5),
            ..ProjectionOptions::default()
        };
        let proceeds = project_net_proceeds_with(&record, &[], &opts);
        assert_eq!(proceeds[0].selling_costs, dec!(15450));
    }
}
