use serde::{Deserialize, Serialize};

use super::loan::{down_payment_amount, points_amount};
use crate::operating::expenses::total_one_time_expenses;
use crate::property::PropertyRecord;
use crate::types::{sum_items, Money};

/// Total cash invested, by source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionBreakdown {
    pub down_payment: Money,
    pub closing_costs: Money,
    pub points: Money,
    pub other_costs: Money,
    pub one_time_expenses: Money,
    pub development_costs: Money,
    pub lost_revenue: Money,
}

impl AcquisitionBreakdown {
    pub fn total(&self) -> Money {
        self.down_payment
            + self.closing_costs
            + self.points
            + self.other_costs
            + self.one_time_expenses
            + self.development_costs
            + self.lost_revenue
    }
}

/// Rehab hard plus soft costs.
pub fn total_development_costs(record: &PropertyRecord) -> Money {
    sum_items(record.hard_costs()) + sum_items(record.soft_costs())
}

/// Rehab-period lost revenue and carrying costs within the holding period.
pub fn total_lost_revenue(record: &PropertyRecord) -> Money {
    record.lost_revenue_schedule().total()
}

pub fn acquisition_breakdown(record: &PropertyRecord) -> AcquisitionBreakdown {
    AcquisitionBreakdown {
        down_payment: down_payment_amount(record),
        closing_costs: record.finance.closing_costs,
        points: points_amount(record),
        other_costs: record.finance.other_costs,
        one_time_expenses: total_one_time_expenses(record),
        development_costs: total_development_costs(record),
        lost_revenue: total_lost_revenue(record),
    }
}

/// Total cash invested at acquisition: the cash-on-cash denominator and the
/// initial outflow of the IRR series.
pub fn acquisition_cost(record: &PropertyRecord) -> Money {
    acquisition_breakdown(record).total()
}
