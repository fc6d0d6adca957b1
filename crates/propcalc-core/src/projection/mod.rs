pub mod cash_flow;
pub mod options;
pub mod value;

pub use options::{DebtServiceGrowth, PercentageExpenseBasis, ProjectionOptions};
