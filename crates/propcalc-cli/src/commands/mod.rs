pub mod property;
pub mod rates;
