pub mod metrics;

pub use crate::time_value::IrrEstimate;
