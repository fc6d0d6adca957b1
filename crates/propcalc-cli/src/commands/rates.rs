use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use propcalc_core::time_value::{level_payment, solve_irr};

/// Arguments for a standalone IRR solve
#[derive(Args)]
pub struct IrrArgs {
    /// Cash flows starting at t=0 (comma-separated, e.g. "-100000,9000,9000,120000")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<Decimal>,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let estimate = solve_irr(&args.cash_flows);
    Ok(serde_json::to_value(estimate)?)
}

/// Arguments for a fixed-rate mortgage payment
#[derive(Args)]
pub struct PaymentArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (6 = 6%)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.principal < Decimal::ZERO {
        return Err("--principal must not be negative".into());
    }
    if args.rate < Decimal::ZERO {
        return Err("--rate must not be negative".into());
    }

    let periods = args.term_years.saturating_mul(12);
    let monthly_rate = args.rate / Decimal::ONE_HUNDRED / Decimal::from(12);
    let payment = level_payment(args.principal, monthly_rate, periods);
    let total_paid = payment * Decimal::from(periods);

    Ok(json!({
        "monthly_payment": payment.round_dp(2),
        "total_payments": periods,
        "total_paid": total_paid.round_dp(2),
        "total_interest": (total_paid - args.principal).max(Decimal::ZERO).round_dp(2),
    }))
}
