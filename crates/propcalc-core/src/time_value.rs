use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropCalcError;
use crate::types::{Money, Percent, Rate};
use crate::PropCalcResult;

pub const IRR_INITIAL_GUESS: Rate = dec!(0.10);
pub const MAX_IRR_ITERATIONS: u32 = 100;
pub const NPV_TOLERANCE: Money = dec!(0.0001);
pub const DERIVATIVE_FLOOR: Decimal = dec!(0.0001);
pub const MIN_IRR_RATE: Rate = dec!(-0.99);
pub const MAX_IRR_RATE: Rate = dec!(10);

/// Outcome of the Newton-Raphson IRR search.
///
/// `irr` is always the solver's last rate as a percentage, whether or not
/// the search converged. `npv_residual` is the NPV at that rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrEstimate {
    pub irr: Percent,
    pub npv_residual: Money,
    pub iterations: u32,
    pub converged: bool,
}

impl IrrEstimate {
    pub fn zero() -> Self {
        Self {
            irr: Decimal::ZERO,
            npv_residual: Decimal::ZERO,
            iterations: 0,
            converged: false,
        }
    }
}

/// Net Present Value of a series of cash flows
pub fn npv(rate: Rate, cash_flows: &[Money]) -> PropCalcResult<Money> {
    if rate <= dec!(-1) {
        return Err(PropCalcError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    npv_and_derivative(cash_flows, rate)
        .map(|(value, _)| value)
        .ok_or_else(|| PropCalcError::DivisionByZero {
            context: format!("NPV discount factors at rate {rate}"),
        })
}

/// NPV(r) = sum CF_t / (1+r)^t and its derivative d(NPV)/dr.
///
/// Returns `None` when a discount factor leaves the Decimal range, which
/// happens for long series at rates near -100%.
pub fn npv_and_derivative(cash_flows: &[Money], rate: Rate) -> Option<(Money, Decimal)> {
    let one_plus_r = Decimal::ONE + rate;
    let mut npv = Decimal::ZERO;
    let mut dnpv = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        npv = npv.checked_add(cf.checked_mul(discount)?)?;
        if t > 0 {
            // d/dr of CF_t / (1+r)^t = -t * CF_t / (1+r)^(t+1)
            let term = Decimal::from(t as i64)
                .checked_mul(*cf)?
                .checked_mul(discount)?
                .checked_div(one_plus_r)?;
            dnpv = dnpv.checked_sub(term)?;
        }
        discount = discount.checked_div(one_plus_r)?;
    }

    Some((npv, dnpv))
}

/// Internal Rate of Return using Newton-Raphson.
///
/// Starts at 10%, stops once |NPV| < 0.0001, aborts when the derivative
/// flattens below 0.0001 and clamps every step to [-99%, 1000%]. After 100
/// iterations the last rate is returned unconverged.
pub fn solve_irr(cash_flows: &[Money]) -> IrrEstimate {
    if cash_flows.is_empty() {
        return IrrEstimate::zero();
    }

    let mut rate = IRR_INITIAL_GUESS;
    let mut residual: Option<Money> = None;
    let mut iterations = 0;

    while iterations < MAX_IRR_ITERATIONS {
        let Some((npv_val, dnpv)) = npv_and_derivative(cash_flows, rate) else {
            break;
        };
        iterations += 1;
        residual = Some(npv_val);

        if npv_val.abs() < NPV_TOLERANCE {
            return IrrEstimate {
                irr: rate * Decimal::ONE_HUNDRED,
                npv_residual: npv_val,
                iterations,
                converged: true,
            };
        }

        if dnpv.abs() < DERIVATIVE_FLOOR {
            break;
        }

        let Some(step) = npv_val.checked_div(dnpv) else {
            break;
        };
        rate = (rate - step).clamp(MIN_IRR_RATE, MAX_IRR_RATE);
    }

    // Residual at the rate actually reported, when it is representable.
    if let Some((npv_val, _)) = npv_and_derivative(cash_flows, rate) {
        residual = Some(npv_val);
    }

    // An NPV that never fit in Decimal is not evidence of convergence.
    IrrEstimate {
        irr: rate * Decimal::ONE_HUNDRED,
        npv_residual: residual.unwrap_or(Decimal::ZERO),
        iterations,
        converged: residual.is_some_and(|r| r.abs() < NPV_TOLERANCE),
    }
}

/// Level payment that fully amortizes `principal` over `periods` at
/// `periodic_rate`: P * r / (1 - (1+r)^-n).
///
/// A zero rate amortizes straight-line (P / n). Non-positive principal,
/// a negative rate or zero periods yield no payment. Once (1+r)^n leaves
/// the representable range the payment is the interest-only limit P * r.
pub fn level_payment(principal: Money, periodic_rate: Rate, periods: u32) -> Money {
    if principal <= Decimal::ZERO || periodic_rate < Decimal::ZERO || periods == 0 {
        return Decimal::ZERO;
    }

    if periodic_rate.is_zero() {
        return principal / Decimal::from(periods);
    }

    let interest_only = principal.saturating_mul(periodic_rate);
    let Some(discount) = (Decimal::ONE + periodic_rate)
        .checked_powu(periods as u64)
        .and_then(|compound| Decimal::ONE.checked_div(compound))
    else {
        return interest_only;
    };
    let denominator = Decimal::ONE - discount;
    if denominator <= Decimal::ZERO {
        // Rate too small to move the discount factor: straight-line limit.
        return principal / Decimal::from(periods);
    }

    interest_only
        .checked_div(denominator)
        .unwrap_or(interest_only)
}

/// Compound growth factor (1 + pct/100)^periods, saturating at `Decimal::MAX`.
pub fn growth_factor(pct: Percent, periods: u32) -> Decimal {
    (Decimal::ONE + pct / Decimal::ONE_HUNDRED)
        .checked_powu(periods as u64)
        .unwrap_or(Decimal::MAX)
}
