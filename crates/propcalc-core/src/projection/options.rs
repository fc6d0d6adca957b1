use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

/// How the monthly mortgage payment evolves in the cash-flow projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtServiceGrowth {
    /// Debt service is grown at the expense growth rate with operating costs
    #[default]
    Compounded,
    /// Debt service stays at the contractual payment
    Fixed,
}

/// What the repairs and management percentages are applied to in later years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageExpenseBasis {
    /// Fixed at year-1 income, then grown at the expense growth rate
    #[default]
    BaseYear,
    /// Recomputed each year against that year's projected income
    ProjectedIncome,
}

/// Projection assumptions that are not part of the property record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    pub debt_service: DebtServiceGrowth,
    /// Broker, transfer and closing costs on sale, in percent of sale price
    pub selling_cost_rate: Percent,
    pub percentage_expenses: PercentageExpenseBasis,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            debt_service: DebtServiceGrowth::Compounded,
            selling_cost_rate: dec!(7),
            percentage_expenses: PercentageExpenseBasis::BaseYear,
        }
    }
}
