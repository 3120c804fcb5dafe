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

/// Input parameters for the interest-only vs principal-and-interest
/// comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestOnlyInput {
    pub loan_amount: Money,
    /// Nominal annual rate as a percentage.
    pub annual_rate_pct: Decimal,
    pub interest_only_years: u32,
    /// Whole loan term; must exceed the interest-only period.
    pub total_term_years: u32,
}

/// Top-level output from `compare_interest_only`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestOnlyOutput {
    pub interest_only_monthly_payment: Money,
    /// Payment once the loan reverts to principal-and-interest over the
    /// remaining term.
    pub principal_and_interest_payment: Money,
    /// Lifetime interest on the IO-then-P&I path.
    pub total_interest_cost: Money,
    /// Lifetime interest had the loan been P&I from day one.
    pub full_pi_interest_cost: Money,
    /// Extra cost of deferring principal; never negative.
    pub cost_difference: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Split the term into an interest-only phase (balance unchanged) followed
/// by full amortization over the remaining months, and price the same loan
/// as P&I from day one for comparison.
pub fn compare_interest_only(
    input: &InterestOnlyInput,
) -> CalcResult<ComputationOutput<InterestOnlyOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.loan_amount <= Decimal::ZERO {
        return Err(CalculatorError::invalid(
            "loan_amount",
            "loan amount must be > 0",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO || input.annual_rate_pct > dec!(100) {
        return Err(CalculatorError::invalid(
            "annual_rate_pct",
            "annual rate must be between 0 and 100 percent",
        ));
    }
    if input.interest_only_years == 0 {
        return Err(CalculatorError::invalid(
            "interest_only_years",
            "interest-only period must be > 0 years",
        ));
    }
    if input.total_term_years <= input.interest_only_years {
        return Err(CalculatorError::invalid(
            "total_term_years",
            "total term must exceed the interest-only period",
        ));
    }

    let monthly_rate = input.annual_rate_pct / dec!(100) / dec!(12);
    let io_months = input.interest_only_years * 12;
    let pi_months = (input.total_term_years - input.interest_only_years) * 12;
    let total_months = input.total_term_years * 12;

    if monthly_rate.is_zero() {
        warnings.push("Zero nominal rate: both structures carry no interest cost".into());
    }

    // IO phase: interest on the untouched balance
    let interest_only_monthly_payment = input.loan_amount * monthly_rate;
    let io_interest = interest_only_monthly_payment * Decimal::from(io_months);

    // Post-IO phase: amortize the full balance over what is left
    let principal_and_interest_payment =
        annuity::periodic_payment(input.loan_amount, monthly_rate, pi_months)?;
    let pi_interest =
        principal_and_interest_payment * Decimal::from(pi_months) - input.loan_amount;

    let total_interest_cost = io_interest + pi_interest;

    // Baseline: P&I from day one over the whole term
    let full_pi_payment =
        annuity::periodic_payment(input.loan_amount, monthly_rate, total_months)?;
    let full_pi_interest_cost =
        full_pi_payment * Decimal::from(total_months) - input.loan_amount;

    let cost_difference = total_interest_cost - full_pi_interest_cost;

    let output = InterestOnlyOutput {
        interest_only_monthly_payment,
        principal_and_interest_payment,
        total_interest_cost,
        full_pi_interest_cost,
        cost_difference,
    };

    Ok(with_metadata(
        "Interest-only vs P&I (two-phase schedule against a full-term baseline)",
        &serde_json::json!({
            "loan_amount": input.loan_amount.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "interest_only_years": input.interest_only_years,
            "total_term_years": input.total_term_years,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
