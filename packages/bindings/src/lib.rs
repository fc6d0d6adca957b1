use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use propcalc_core::analysis::PropertyAnalysisInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse a property document: either `{ property, options }` or a bare record.
fn parse_property(input_json: &str) -> NapiResult<PropertyAnalysisInput> {
    let value: serde_json::Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
    PropertyAnalysisInput::from_value(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Full analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_property(input_json: String) -> NapiResult<String> {
    let input = parse_property(&input_json)?;
    let output = propcalc_core::analysis::analyze_property(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Yearly series
// ---------------------------------------------------------------------------

#[napi]
pub fn project_cash_flows(input_json: String) -> NapiResult<String> {
    let input = parse_property(&input_json)?;
    let output =
        propcalc_core::projection::cash_flow::project_cash_flows_with(&input.property, &input.options);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_property(&input_json)?;
    let output = propcalc_core::financing::amortization::amortization_schedule(&input.property);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_net_proceeds(input_json: String) -> NapiResult<String> {
    let input = parse_property(&input_json)?;
    let schedule = propcalc_core::financing::amortization::amortization_schedule(&input.property);
    let output = propcalc_core::projection::value::project_net_proceeds_with(
        &input.property,
        &schedule,
        &input.options,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_returns(input_json: String) -> NapiResult<String> {
    let input = parse_property(&input_json)?;
    let output = propcalc_core::returns::metrics::calculate_returns(&input.property, &input.options);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// `input_json` is a JSON array of cash flows starting at t=0.
#[napi]
pub fn calculate_irr(input_json: String) -> NapiResult<String> {
    let flows: Vec<Decimal> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = propcalc_core::time_value::solve_irr(&flows);
    serde_json::to_string(&output).map_err(to_napi_error)
}
