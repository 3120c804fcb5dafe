use rust_decimal::Decimal;

use crate::error::CalculatorError;
use crate::types::{Money, Rate};
use crate::CalcResult;

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd
/// drift over long horizons; a 50-year weekly loan is 2,600 periods).
pub fn compound(rate: Rate, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

/// Fixed payment that fully amortizes `principal` over `periods` at the
/// periodic rate: P·r·(1+r)^n / ((1+r)^n − 1).
///
/// A zero rate degenerates to straight-line repayment of principal / n.
pub fn periodic_payment(principal: Money, rate: Rate, periods: u32) -> CalcResult<Money> {
    if periods == 0 {
        return Err(CalculatorError::invalid(
            "periods",
            "number of repayment periods must be > 0",
        ));
    }
    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound(rate, periods);
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(CalculatorError::DivisionByZero {
            context: "annuity payment factor".into(),
        });
    }
    Ok(principal * rate * factor / denom)
}

/// Largest principal a fixed payment can service over `periods` at the
/// periodic rate: pmt·(1 − (1+r)^−n) / r. Zero rate degenerates to pmt·n.
pub fn max_principal(payment: Money, rate: Rate, periods: u32) -> CalcResult<Money> {
    if periods == 0 {
        return Err(CalculatorError::invalid(
            "periods",
            "number of repayment periods must be > 0",
        ));
    }
    if rate.is_zero() {
        return Ok(payment * Decimal::from(periods));
    }

    let factor = compound(rate, periods);
    if factor.is_zero() {
        return Err(CalculatorError::DivisionByZero {
            context: "inverse annuity compound factor".into(),
        });
    }
    Ok(payment * (Decimal::ONE - Decimal::ONE / factor) / rate)
}
