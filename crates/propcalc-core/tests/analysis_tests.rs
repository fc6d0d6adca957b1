use pretty_assertions::assert_eq;
use propcalc_core::analysis::{analyze_property, PropertyAnalysisInput};
use propcalc_core::projection::DebtServiceGrowth;
use propcalc_core::PropCalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FOURPLEX_JSON: &str = r#"{
    "property": {
        "address": "910 Canal St",
        "nickname": "Canal fourplex",
        "purchase_price": "640000",
        "property_type": "MultiFamily",
        "units": [
            { "monthly_rent": "1450", "number_of_units": 2, "beds": 2, "baths": "1" },
            { "monthly_rent": "1650", "number_of_units": 2, "beds": 3, "baths": "1.5" }
        ],
        "other_income": [ { "category": "Laundry", "amount": "120" } ],
        "finance": {
            "down_payment": "25",
            "down_payment_type": "percentage",
            "interest_rate": "6.75",
            "loan_term": 30,
            "closing_costs": "12000",
            "points": "0.5"
        },
        "expenses": {
            "annual_property_taxes": "9600",
            "annual_property_insurance": "3000",
            "water": "220",
            "repairs_maintenance_percentage": "5",
            "property_management_percentage": "8",
            "custom_expenses": [ { "category": "Pest control", "amount": "40" } ],
            "one_time_expenses": [ { "category": "Inspection", "amount": "900" } ]
        },
        "rehab": {
            "hard_costs": [ { "category": "Flooring", "amount": "14000" } ],
            "lost_revenue_and_costs": [
                { "year": 1, "items": [ { "category": "Unit 3 down", "amount": "4950" } ] },
                { "year": 12, "items": [ { "category": "Outside hold", "amount": "999" } ] }
            ]
        },
        "hold_period": 7,
        "vacancy_rate": "6"
    },
    "options": { "debt_service": "fixed" }
}"#;

fn fourplex() -> PropertyAnalysisInput {
    serde_json::from_str(FOURPLEX_JSON).unwrap()
}

// ===========================================================================
// End-to-end
// ===========================================================================

#[test]
fn test_fourplex_end_to_end() {
    let input = fourplex();
    assert_eq!(input.options.debt_service, DebtServiceGrowth::Fixed);
    assert_eq!(input.options.selling_cost_rate, dec!(7));

    let out = analyze_property(&input).unwrap();
    let a = &out.result;
    let s = &a.summary;

    assert_eq!(s.monthly_income, dec!(6320));
    assert_eq!(s.loan_amount, dec!(480000));
    assert_eq!(s.down_payment, dec!(160000));
    // 800 + 250 + 220 + 316 + 505.6 + 40
    assert_eq!(s.monthly_operating_expenses, dec!(2131.6));
    // 160000 + 12000 + 2400 + 900 + 14000 + 4950
    assert_eq!(s.total_cash_invested, dec!(194250));
    assert_eq!(s.acquisition_breakdown.total(), s.total_cash_invested);

    assert_eq!(a.cash_flows.len(), 7);
    assert_eq!(a.amortization.len(), 7);
    assert_eq!(a.net_proceeds.len(), 7);
    assert_eq!(a.returns.initial_investment, s.total_cash_invested);

    assert!(out
        .warnings
        .iter()
        .any(|w| w.contains("[12]") && w.contains("ignored")));
}

#[test]
fn test_fixed_debt_service_carries_through_returns() {
    let fixed = fourplex();
    let mut compounded = fourplex();
    compounded.options.debt_service = DebtServiceGrowth::Compounded;

    let f = analyze_property(&fixed).unwrap().result;
    let c = analyze_property(&compounded).unwrap().result;

    assert_eq!(f.cash_flows[0], c.cash_flows[0]);
    assert!(f.returns.total_cash_flow > c.returns.total_cash_flow);
    assert_eq!(f.net_proceeds, c.net_proceeds);
}

#[test]
fn test_bare_record_analysis() {
    let input = PropertyAnalysisInput::from(fourplex().property);
    let out = analyze_property(&input).unwrap();
    assert_eq!(out.result.cash_flows.len(), 7);
    assert_eq!(out.assumptions["options"]["debt_service"], "compounded");
}

#[test]
fn test_options_default_when_absent() {
    let input: PropertyAnalysisInput = serde_json::from_str(
        r#"{
            "property": {
                "purchase_price": 150000,
                "units": [{ "monthly_rent": 1300 }],
                "finance": { "down_payment": 100 }
            }
        }"#,
    )
    .unwrap();
    assert_eq!(input.options.debt_service, DebtServiceGrowth::Compounded);

    let out = analyze_property(&input).unwrap();
    // Unfinanced purchase: no loan schedule, unencumbered sale every year
    assert!(out.result.amortization.is_empty());
    assert_eq!(out.result.net_proceeds.len(), 5);
    assert_eq!(out.result.summary.monthly_mortgage, Decimal::ZERO);
    assert_eq!(out.result.summary.debt_service_coverage, Decimal::ZERO);
}

#[test]
fn test_output_serializes_to_json() {
    let out = analyze_property(&fourplex()).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert!(json["result"]["summary"]["cap_rate"].is_string());
    assert_eq!(json["result"]["cash_flows"].as_array().map(|a| a.len()), Some(7));
    assert!(json["result"]["returns"]["irr"]["converged"].is_boolean());
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_negative_price_rejected() {
    let mut input = fourplex();
    input.property.purchase_price = dec!(-1);
    let err = analyze_property(&input).unwrap_err();
    assert!(matches!(err, PropCalcError::InvalidInput { ref field, .. } if field == "purchase_price"));
}

#[test]
fn test_zero_unit_count_rejected() {
    let mut input = fourplex();
    input.property.units[1].number_of_units = 0;
    let err = analyze_property(&input).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: units[1].number_of_units — Each unit entry must represent at least one unit"
    );
}

#[test]
fn test_negative_interest_rejected() {
    let mut input = fourplex();
    input.property.finance.interest_rate = dec!(-0.5);
    assert!(analyze_property(&input).is_err());
}

#[test]
fn test_zero_term_warns_and_degrades() {
    let mut input = fourplex();
    input.property.finance.loan_term = 0;
    let out = analyze_property(&input).unwrap();
    assert!(out.result.amortization.is_empty());
    assert!(out.result.net_proceeds.is_empty());
    assert_eq!(out.result.returns.final_net_proceeds, Decimal::ZERO);
    assert!(out.warnings.iter().any(|w| w.contains("zero loan term")));
}

#[test]
fn test_high_vacancy_warning() {
    let mut input = fourplex();
    input.property.vacancy_rate = dec!(20);
    let out = analyze_property(&input).unwrap();
    assert!(out.warnings.iter().any(|w| w.contains("Vacancy rate")));
}

// ===========================================================================
// Extreme inputs
// ===========================================================================

#[test]
fn test_runaway_growth_over_long_hold_saturates() {
    let mut input = fourplex();
    input.property.projected_rent_growth = dec!(100);
    input.property.appreciation_rate = dec!(100);
    input.property.hold_period = 100;

    let out = analyze_property(&input).unwrap();
    let result = &out.result;
    assert_eq!(result.cash_flows.len(), 100);
    assert_eq!(result.cash_flows[99].annual_cash_flow, Decimal::MAX);
    assert_eq!(result.property_values[99].property_value, Decimal::MAX);

    let returns = &result.returns;
    assert_eq!(returns.total_cash_flow, Decimal::MAX);
    assert_eq!(returns.projected_final_value, Decimal::MAX);
    assert!(returns.final_net_proceeds > Decimal::ZERO);
    assert_eq!(returns.total_return, Decimal::MAX - returns.initial_investment);
    assert!(returns.total_return_percentage > Decimal::ZERO);
    assert!(returns.irr.irr >= dec!(-99) && returns.irr.irr <= dec!(1000));
    assert!(returns.exit_irr.irr >= dec!(-99) && returns.exit_irr.irr <= dec!(1000));
}

#[test]
fn test_extreme_interest_rate_pays_interest_only() {
    let mut input = fourplex();
    input.property.finance.interest_rate = dec!(240);

    let out = analyze_property(&input).unwrap();
    // 480,000 loan at 20% a month
    let mortgage = out.result.summary.monthly_mortgage;
    assert!((mortgage - dec!(96000)).abs() < dec!(0.01), "got {mortgage}");
    assert_eq!(out.result.amortization.len(), 7);
    assert!(out.result.summary.annual_cash_flow < Decimal::ZERO);
}
