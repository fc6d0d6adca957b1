use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::financing::acquisition::{acquisition_breakdown, AcquisitionBreakdown};
use crate::financing::amortization::{amortization_schedule, LoanYearBalance};
use crate::financing::loan::{down_payment_amount, loan_amount, monthly_payment};
use crate::operating::expenses::{expense_breakdown, ExpenseBreakdown};
use crate::operating::income::{effective_monthly_income, total_monthly_income};
use crate::projection::cash_flow::{project_cash_flows_with, YearlyCashFlow};
use crate::projection::options::ProjectionOptions;
use crate::projection::value::{
    project_net_proceeds_with, project_property_values, NetProceedsYear, PropertyValueYear,
};
use crate::property::{out_of_range_years, PropertyRecord};
use crate::returns::metrics::{calculate_returns, ReturnAnalysis};
use crate::types::{percent_of, with_metadata, ComputationOutput, LineItem, Money, Percent};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A property record plus the projection assumptions to run it under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyAnalysisInput {
    pub property: PropertyRecord,
    #[serde(default)]
    pub options: ProjectionOptions,
}

impl From<PropertyRecord> for PropertyAnalysisInput {
    fn from(property: PropertyRecord) -> Self {
        Self {
            property,
            options: ProjectionOptions::default(),
        }
    }
}

impl PropertyAnalysisInput {
    /// Accept either `{ "property": {...}, "options": {...} }` or a bare
    /// property record, which runs under default options.
    pub fn from_value(value: serde_json::Value) -> PropCalcResult<Self> {
        if value.get("property").is_some() {
            Ok(serde_json::from_value(value)?)
        } else {
            let record: PropertyRecord = serde_json::from_value(value)?;
            Ok(Self::from(record))
        }
    }
}

/// Year-one operating snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub monthly_income: Money,
    /// Monthly income after the vacancy allowance
    pub effective_monthly_income: Money,
    pub monthly_operating_expenses: Money,
    pub monthly_mortgage: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub total_cash_invested: Money,
    /// Annual effective income less operating expenses, before debt service
    pub net_operating_income: Money,
    pub cap_rate: Percent,
    pub debt_service_coverage: Decimal,
    pub loan_to_value: Percent,
    pub vacancy_rate: Percent,
    pub expense_breakdown: ExpenseBreakdown,
    pub acquisition_breakdown: AcquisitionBreakdown,
}

/// Complete projection for one property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyAnalysis {
    pub summary: AnalysisSummary,
    pub cash_flows: Vec<YearlyCashFlow>,
    pub amortization: Vec<LoanYearBalance>,
    pub property_values: Vec<PropertyValueYear>,
    pub net_proceeds: Vec<NetProceedsYear>,
    pub returns: ReturnAnalysis,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every projection for a property and wrap the result with warnings
/// and computation metadata.
pub fn analyze_property(
    input: &PropertyAnalysisInput,
) -> PropCalcResult<ComputationOutput<PropertyAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let record = &input.property;

    validate_record(record, &mut warnings)?;

    let cash_flows = project_cash_flows_with(record, &input.options);
    let amortization = amortization_schedule(record);
    let property_values = project_property_values(record);
    let net_proceeds = project_net_proceeds_with(record, &amortization, &input.options);
    let returns = calculate_returns(record, &input.options);
    let summary = build_summary(record, &cash_flows, &returns);

    collect_warnings(record, &summary, &returns, &mut warnings);

    let output = PropertyAnalysis {
        summary,
        cash_flows,
        amortization,
        property_values,
        net_proceeds,
        returns,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Property Cash Flow and Return Projection",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> PropCalcError {
    PropCalcError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

fn check_items(field: &str, items: &[LineItem]) -> PropCalcResult<()> {
    for (idx, item) in items.iter().enumerate() {
        if item.amount < Decimal::ZERO {
            return Err(invalid(
                format!("{field}[{idx}].amount"),
                format!("Amount for '{}' must not be negative", item.category),
            ));
        }
    }
    Ok(())
}

fn validate_record(record: &PropertyRecord, warnings: &mut Vec<String>) -> PropCalcResult<()> {
    if record.units.is_empty() {
        return Err(invalid("units", "At least one unit is required"));
    }

    if record.hold_period < 1 {
        return Err(invalid(
            "hold_period",
            "Holding period must be at least 1 year",
        ));
    }

    if record.purchase_price < Decimal::ZERO {
        return Err(invalid("purchase_price", "Purchase price must not be negative"));
    }

    for (idx, unit) in record.units.iter().enumerate() {
        if unit.number_of_units < 1 {
            return Err(invalid(
                format!("units[{idx}].number_of_units"),
                "Each unit entry must represent at least one unit",
            ));
        }
        if unit.monthly_rent < Decimal::ZERO {
            return Err(invalid(
                format!("units[{idx}].monthly_rent"),
                "Monthly rent must not be negative",
            ));
        }
    }

    if record.finance.interest_rate < Decimal::ZERO {
        return Err(invalid("finance.interest_rate", "Interest rate must not be negative"));
    }

    check_items("other_income", &record.other_income)?;
    check_items("expenses.custom_expenses", &record.expenses.custom_expenses)?;
    check_items("expenses.one_time_expenses", &record.expenses.one_time_expenses)?;
    check_items("rehab.hard_costs", record.hard_costs())?;
    check_items("rehab.soft_costs", record.soft_costs())?;
    for entry in record.lost_revenue_entries() {
        check_items(
            &format!("rehab.lost_revenue_and_costs[year {}].items", entry.year),
            &entry.items,
        )?;
    }

    if record.purchase_price.is_zero() {
        warnings.push("Purchase price is zero — financing and appreciation are not modelled".into());
    }

    let ignored = out_of_range_years(record.lost_revenue_entries(), record.hold_period);
    if !ignored.is_empty() {
        warnings.push(format!(
            "Lost revenue for years {ignored:?} falls outside the 1..={} holding period and is ignored",
            record.hold_period
        ));
    }

    if loan_amount(record) > Decimal::ZERO {
        if record.finance.loan_term == 0 {
            warnings.push(
                "Financed purchase has a zero loan term — no debt service or amortization".into(),
            );
        } else if record.finance.interest_rate.is_zero() {
            warnings.push("Zero-interest loan amortized straight-line over the term".into());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

fn build_summary(
    record: &PropertyRecord,
    cash_flows: &[YearlyCashFlow],
    returns: &ReturnAnalysis,
) -> AnalysisSummary {
    let twelve = Decimal::from(12);
    let expenses = expense_breakdown(record);
    let operating = expenses.total();
    let mortgage = monthly_payment(record);
    let loan = loan_amount(record);
    let effective_income = effective_monthly_income(record);

    let net_operating_income = (effective_income - operating).saturating_mul(twelve);
    let annual_debt_service = mortgage.saturating_mul(twelve);

    let cap_rate = if record.purchase_price > Decimal::ZERO {
        percent_of(net_operating_income, record.purchase_price)
    } else {
        Decimal::ZERO
    };

    let debt_service_coverage = if annual_debt_service.is_zero() {
        Decimal::ZERO
    } else {
        net_operating_income / annual_debt_service
    };

    let loan_to_value = if record.purchase_price > Decimal::ZERO {
        percent_of(loan, record.purchase_price)
    } else {
        Decimal::ZERO
    };

    let (monthly_cash_flow, annual_cash_flow) = cash_flows
        .first()
        .map(|y1| (y1.monthly_cash_flow, y1.annual_cash_flow))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    AnalysisSummary {
        monthly_income: total_monthly_income(record),
        effective_monthly_income: effective_income,
        monthly_operating_expenses: operating,
        monthly_mortgage: mortgage,
        monthly_cash_flow,
        annual_cash_flow,
        down_payment: down_payment_amount(record),
        loan_amount: loan,
        total_cash_invested: returns.initial_investment,
        net_operating_income,
        cap_rate,
        debt_service_coverage,
        loan_to_value,
        vacancy_rate: record.vacancy_rate,
        expense_breakdown: expenses,
        acquisition_breakdown: acquisition_breakdown(record),
    }
}

fn collect_warnings(
    record: &PropertyRecord,
    summary: &AnalysisSummary,
    returns: &ReturnAnalysis,
    warnings: &mut Vec<String>,
) {
    if returns.initial_investment > Decimal::ZERO && !returns.irr.converged {
        warnings.push(format!(
            "IRR did not converge after {} iterations (NPV residual {:.4}) — treat {:.2}% as an estimate",
            returns.irr.iterations, returns.irr.npv_residual, returns.irr.irr
        ));
    }

    if summary.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Year 1 cash flow is negative ({:.2}) — property does not carry its costs",
            summary.annual_cash_flow
        ));
    }

    if summary.loan_to_value > dec!(80) {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80% — high leverage",
            summary.loan_to_value
        ));
    }

    if summary.debt_service_coverage > Decimal::ZERO && summary.debt_service_coverage < dec!(1.2) {
        warnings.push(format!(
            "DSCR of {:.2} is below 1.20x — lender covenant risk",
            summary.debt_service_coverage
        ));
    }

    if record.vacancy_rate > dec!(15) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
            record.vacancy_rate
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
