pub mod acquisition;
pub mod amortization;
pub mod loan;
