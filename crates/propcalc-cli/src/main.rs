mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::property::PropertyArgs;
use commands::rates::{IrrArgs, PaymentArgs};

/// Rental property cash-flow and return projections
#[derive(Parser)]
#[command(
    name = "propcalc",
    version,
    about = "Rental property cash-flow and return projections",
    long_about = "A CLI for projecting rental property investments with decimal precision. \
                  Reads a property record (JSON or YAML) and reports yearly cash flows, \
                  loan amortization, property values, net sale proceeds, cash-on-cash ROI \
                  and IRR over the holding period."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: summary, every yearly series and return metrics
    Analyze(PropertyArgs),
    /// Yearly income, expenses and cash flow over the holding period
    CashFlows(PropertyArgs),
    /// Year-end loan balances with principal and interest paid
    Amortization(PropertyArgs),
    /// Projected property values and net sale proceeds
    Values(PropertyArgs),
    /// Cash-on-cash ROI, IRR and total return
    Returns(PropertyArgs),
    /// Total cash invested at acquisition, by source
    Acquisition(PropertyArgs),
    /// Solve the IRR of an arbitrary cash-flow series
    Irr(IrrArgs),
    /// Fixed-rate mortgage payment
    Payment(PaymentArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::property::run_analyze(args),
        Commands::CashFlows(args) => commands::property::run_cash_flows(args),
        Commands::Amortization(args) => commands::property::run_amortization(args),
        Commands::Values(args) => commands::property::run_values(args),
        Commands::Returns(args) => commands::property::run_returns(args),
        Commands::Acquisition(args) => commands::property::run_acquisition(args),
        Commands::Irr(args) => commands::rates::run_irr(args),
        Commands::Payment(args) => commands::rates::run_payment(args),
        Commands::Version => {
            println!("propcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
