use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity;
use crate::error::CalculatorError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a refinance comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub current_balance: Money,
    /// Current nominal annual rate as a percentage.
    pub current_rate_pct: Decimal,
    pub current_annual_fees: Money,
    /// Proposed nominal annual rate as a percentage.
    pub new_rate_pct: Decimal,
    pub new_annual_fees: Money,
    /// One-off cost of switching (discharge, application, government fees).
    pub refinance_costs: Money,
    pub remaining_term_years: u32,
}

/// Top-level output from `compare_refinance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceOutput {
    pub current_monthly_payment: Money,
    pub new_monthly_payment: Money,
    pub monthly_savings: Money,
    pub total_interest_saved: Money,
    /// None when the new loan does not lower the monthly payment.
    pub break_even_months: Option<Decimal>,
    pub total_savings: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compare full amortization of the existing loan against a new loan over
/// the same balance and remaining term, deriving savings and break-even.
pub fn compare_refinance(
    input: &RefinanceInput,
) -> CalcResult<ComputationOutput<RefinanceOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.current_balance <= Decimal::ZERO {
        return Err(CalculatorError::invalid(
            "current_balance",
            "loan balance must be > 0",
        ));
    }
    for (field, pct) in [
        ("current_rate_pct", input.current_rate_pct),
        ("new_rate_pct", input.new_rate_pct),
    ] {
        if pct < Decimal::ZERO || pct > dec!(100) {
            return Err(CalculatorError::invalid(
                field,
                "annual rate must be between 0 and 100 percent",
            ));
        }
    }
    for (field, value) in [
        ("current_annual_fees", input.current_annual_fees),
        ("new_annual_fees", input.new_annual_fees),
        ("refinance_costs", input.refinance_costs),
    ] {
        if value < Decimal::ZERO {
            return Err(CalculatorError::invalid(field, "must be >= 0"));
        }
    }
    if input.remaining_term_years == 0 {
        return Err(CalculatorError::invalid(
            "remaining_term_years",
            "remaining term must be > 0 years",
        ));
    }

    let remaining_months = input.remaining_term_years * 12;
    let months_dec = Decimal::from(remaining_months);

    let current_monthly_payment = annuity::periodic_payment(
        input.current_balance,
        input.current_rate_pct / dec!(100) / dec!(12),
        remaining_months,
    )?;
    let new_monthly_payment = annuity::periodic_payment(
        input.current_balance,
        input.new_rate_pct / dec!(100) / dec!(12),
        remaining_months,
    )?;

    let monthly_savings = current_monthly_payment - new_monthly_payment;

    let current_total_interest = current_monthly_payment * months_dec - input.current_balance;
    let new_total_interest = new_monthly_payment * months_dec - input.current_balance;
    let total_interest_saved = current_total_interest - new_total_interest;

    // Annual fee delta is charged against every remaining month, matching
    // the published calculator.
    let fee_delta = input.new_annual_fees - input.current_annual_fees;
    let net_switching_cost = input.refinance_costs + fee_delta * months_dec;
    if !fee_delta.is_zero() {
        warnings.push(
            "Annual fee difference is applied to every month of the remaining term in the \
             break-even and total savings figures"
                .into(),
        );
    }

    let break_even_months = if monthly_savings > Decimal::ZERO {
        // A non-positive switching cost breaks even immediately.
        Some((net_switching_cost / monthly_savings).max(Decimal::ZERO))
    } else {
        warnings.push(
            "New loan does not lower the monthly payment; break-even is not applicable".into(),
        );
        None
    };

    let total_savings = total_interest_saved - net_switching_cost;

    let output = RefinanceOutput {
        current_monthly_payment,
        new_monthly_payment,
        monthly_savings,
        total_interest_saved,
        break_even_months,
        total_savings,
    };

    Ok(with_metadata(
        "Refinance comparison (matched-term amortization of both loans)",
        &serde_json::json!({
            "current_balance": input.current_balance.to_string(),
            "current_rate_pct": input.current_rate_pct.to_string(),
            "new_rate_pct": input.new_rate_pct.to_string(),
            "remaining_term_years": input.remaining_term_years,
            "refinance_costs": input.refinance_costs.to_string(),
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
