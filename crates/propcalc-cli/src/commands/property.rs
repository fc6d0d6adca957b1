use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use propcalc_core::analysis::{self, PropertyAnalysisInput};
use propcalc_core::financing::acquisition::acquisition_breakdown;
use propcalc_core::financing::amortization::amortization_schedule;
use propcalc_core::projection::cash_flow::project_cash_flows_with;
use propcalc_core::projection::value::{project_net_proceeds_with, project_property_values};
use propcalc_core::projection::{DebtServiceGrowth, PercentageExpenseBasis};
use propcalc_core::returns::metrics::calculate_returns;

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DebtServiceArg {
    /// Grow the mortgage payment with operating expenses
    Compounded,
    /// Keep the mortgage payment at its contractual amount
    Fixed,
}

impl From<DebtServiceArg> for DebtServiceGrowth {
    fn from(arg: DebtServiceArg) -> Self {
        match arg {
            DebtServiceArg::Compounded => DebtServiceGrowth::Compounded,
            DebtServiceArg::Fixed => DebtServiceGrowth::Fixed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PercentageExpenseArg {
    /// Take repairs and management from year-1 income, grown with expenses
    BaseYear,
    /// Take repairs and management from each year's projected income
    ProjectedIncome,
}

impl From<PercentageExpenseArg> for PercentageExpenseBasis {
    fn from(arg: PercentageExpenseArg) -> Self {
        match arg {
            PercentageExpenseArg::BaseYear => PercentageExpenseBasis::BaseYear,
            PercentageExpenseArg::ProjectedIncome => PercentageExpenseBasis::ProjectedIncome,
        }
    }
}

/// Arguments shared by every property projection command
#[derive(Args)]
pub struct PropertyArgs {
    /// Path to a JSON or YAML property file (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Override the holding period in years
    #[arg(long)]
    pub hold_period: Option<u32>,

    /// How debt service evolves in the cash-flow projection
    #[arg(long, value_enum)]
    pub debt_service: Option<DebtServiceArg>,

    /// Selling costs as a percent of sale price (default 7)
    #[arg(long)]
    pub selling_cost_rate: Option<Decimal>,

    /// Income the repairs and management percentages apply to in later years
    #[arg(long, value_enum)]
    pub percentage_expenses: Option<PercentageExpenseArg>,
}

/// Load a property document and apply command-line overrides.
fn load(args: &PropertyArgs) -> Result<PropertyAnalysisInput, Box<dyn std::error::Error>> {
    let value = if let Some(ref path) = args.input {
        input::file::read_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <property.json|property.yaml> or stdin required".into());
    };

    let mut loaded = PropertyAnalysisInput::from_value(value)?;

    if let Some(years) = args.hold_period {
        loaded.property.hold_period = years;
    }
    if let Some(mode) = args.debt_service {
        loaded.options.debt_service = mode.into();
    }
    if let Some(rate) = args.selling_cost_rate {
        loaded.options.selling_cost_rate = rate;
    }
    if let Some(basis) = args.percentage_expenses {
        loaded.options.percentage_expenses = basis.into();
    }

    Ok(loaded)
}

pub fn run_analyze(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = load(&args)?;
    let result = analysis::analyze_property(&loaded)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_flows(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = load(&args)?;
    let series = project_cash_flows_with(&loaded.property, &loaded.options);
    Ok(serde_json::to_value(series)?)
}

pub fn run_amortization(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = load(&args)?;
    let schedule = amortization_schedule(&loaded.property);
    Ok(serde_json::to_value(schedule)?)
}

pub fn run_values(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = load(&args)?;
    let record = &loaded.property;
    let schedule = amortization_schedule(record);
    Ok(json!({
        "property_values": project_property_values(record),
        "net_proceeds": project_net_proceeds_with(record, &schedule, &loaded.options),
    }))
}

pub fn run_returns(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = load(&args)?;
    let returns = calculate_returns(&loaded.property, &loaded.options);
    Ok(serde_json::to_value(returns)?)
}

pub fn run_acquisition(args: PropertyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loaded = load(&args)?;
    let breakdown = acquisition_breakdown(&loaded.property);
    let mut value = serde_json::to_value(&breakdown)?;
    if let Value::Object(ref mut map) = value {
        map.insert("total".into(), serde_json::to_value(breakdown.total())?);
    }
    Ok(value)
}
