pub mod analysis;
pub mod error;
pub mod financing;
pub mod operating;
pub mod projection;
pub mod property;
pub mod returns;
pub mod time_value;
pub mod types;

pub use error::PropCalcError;
pub use types::*;

/// Standard result type for all propcalc operations
pub type PropCalcResult<T> = Result<T, PropCalcError>;
