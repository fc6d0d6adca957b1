pub mod record;
pub mod rehab;

pub use record::{
    DownPaymentType, Expenses, Finance, PropertyRecord, PropertyType, Rehab, Unit,
};
pub use rehab::{out_of_range_years, LostRevenueSchedule, LostRevenueYear};
