use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::financing::acquisition::acquisition_cost;
use crate::financing::amortization::amortization_schedule;
use crate::projection::cash_flow::{annual_cash_flows, project_cash_flows, project_cash_flows_with};
use crate::projection::options::ProjectionOptions;
use crate::projection::value::{project_net_proceeds_with, property_value};
use crate::property::PropertyRecord;
use crate::time_value::{solve_irr, IrrEstimate};
use crate::types::{percent_of, saturating_sum, Money, Percent};

/// Return metrics over the holding period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnAnalysis {
    pub initial_investment: Money,
    pub cash_on_cash_roi: Percent,
    /// IRR of the operating cash flows alone
    pub irr: IrrEstimate,
    /// IRR including net sale proceeds at the end of the holding period
    pub exit_irr: IrrEstimate,
    pub total_cash_flow: Money,
    pub average_annual_cash_flow: Money,
    pub final_net_proceeds: Money,
    pub total_return: Money,
    pub total_return_percentage: Percent,
    pub projected_final_value: Money,
}

fn mean(values: &[Money]) -> Money {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    saturating_sum(values) / Decimal::from(values.len() as u64)
}

/// Average annual cash flow over acquisition cost, in percent.
pub fn cash_on_cash_from_series(annual_cash_flows: &[Money], acquisition_cost: Money) -> Percent {
    if acquisition_cost <= Decimal::ZERO || annual_cash_flows.is_empty() {
        return Decimal::ZERO;
    }
    percent_of(mean(annual_cash_flows), acquisition_cost)
}

pub fn cash_on_cash_roi(record: &PropertyRecord) -> Percent {
    let series = annual_cash_flows(&project_cash_flows(record));
    cash_on_cash_from_series(&series, acquisition_cost(record))
}

/// `[-acquisition_cost, annual_cash_flow(1), ..., annual_cash_flow(n)]`
pub fn investment_flows(acquisition_cost: Money, annual_cash_flows: &[Money]) -> Vec<Money> {
    let mut flows = Vec::with_capacity(annual_cash_flows.len() + 1);
    flows.push(-acquisition_cost);
    flows.extend_from_slice(annual_cash_flows);
    flows
}

/// IRR of an investment series; zero without solving when nothing was
/// invested or there are no operating years.
pub fn irr_from_flows(acquisition_cost: Money, annual_cash_flows: &[Money]) -> IrrEstimate {
    if acquisition_cost <= Decimal::ZERO || annual_cash_flows.is_empty() {
        return IrrEstimate::zero();
    }
    solve_irr(&investment_flows(acquisition_cost, annual_cash_flows))
}

/// IRR of the projected operating cash flows against the cash invested.
pub fn irr(record: &PropertyRecord) -> IrrEstimate {
    let series = annual_cash_flows(&project_cash_flows(record));
    irr_from_flows(acquisition_cost(record), &series)
}

pub fn calculate_returns(record: &PropertyRecord, options: &ProjectionOptions) -> ReturnAnalysis {
    let invested = acquisition_cost(record);
    let flows = annual_cash_flows(&project_cash_flows_with(record, options));
    let schedule = amortization_schedule(record);
    let proceeds = project_net_proceeds_with(record, &schedule, options);

    let final_net_proceeds = proceeds
        .iter()
        .find(|p| p.year == record.hold_period)
        .map(|p| p.net_proceeds)
        .unwrap_or(Decimal::ZERO);

    let mut with_exit = flows.clone();
    if let Some(last) = with_exit.last_mut() {
        *last = last.saturating_add(final_net_proceeds);
    }

    let total_cash_flow = saturating_sum(&flows);
    let total_return = total_cash_flow
        .saturating_add(final_net_proceeds)
        .saturating_sub(invested);
    let total_return_percentage = if invested > Decimal::ZERO {
        percent_of(total_return, invested)
    } else {
        Decimal::ZERO
    };

    ReturnAnalysis {
        initial_investment: invested,
        cash_on_cash_roi: cash_on_cash_from_series(&flows, invested),
        irr: irr_from_flows(invested, &flows),
        exit_irr: irr_from_flows(invested, &with_exit),
        total_cash_flow,
        average_annual_cash_flow: mean(&flows),
        final_net_proceeds,
        total_return,
        total_return_percentage,
        projected_final_value: property_value(record, record.hold_period),
    }
}
