use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity;
use crate::error::CalculatorError;
use crate::types::{with_metadata, ComputationOutput, Money, RepaymentFrequency};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an amortized loan repayment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentInput {
    pub principal: Money,
    /// Nominal annual rate as a percentage (6.5 = 6.5%).
    pub annual_rate_pct: Decimal,
    pub term_years: u32,
    pub frequency: RepaymentFrequency,
}

/// Top-level output from `calculate_repayment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentOutput {
    pub periodic_repayment: Money,
    pub total_repayments: Money,
    pub total_interest: Money,
    /// First 12 periods (or fewer for short loans) of the amortization
    /// schedule.
    pub schedule_preview: Vec<SchedulePeriod>,
}

/// One row of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub period: u32,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

const SCHEDULE_PREVIEW_PERIODS: u32 = 12;

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the fixed repayment that fully amortizes the loan, lifetime
/// totals, and a preview of the repayment schedule.
pub fn calculate_repayment(
    input: &RepaymentInput,
) -> CalcResult<ComputationOutput<RepaymentOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.principal <= Decimal::ZERO {
        return Err(CalculatorError::invalid(
            "principal",
            "loan principal must be > 0",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO || input.annual_rate_pct > dec!(100) {
        return Err(CalculatorError::invalid(
            "annual_rate_pct",
            "annual rate must be between 0 and 100 percent",
        ));
    }
    if input.term_years == 0 {
        return Err(CalculatorError::invalid(
            "term_years",
            "loan term must be > 0 years",
        ));
    }

    let periods_per_year = input.frequency.periods_per_year();
    let total_periods = input.term_years * periods_per_year;
    let periodic_rate = input.annual_rate_pct / dec!(100) / Decimal::from(periods_per_year);

    if periodic_rate.is_zero() {
        warnings.push(
            "Zero nominal rate: repayment is straight-line principal with no interest".into(),
        );
    }

    let periodic_repayment = annuity::periodic_payment(input.principal, periodic_rate, total_periods)?;
    let total_repayments = periodic_repayment * Decimal::from(total_periods);
    let total_interest = total_repayments - input.principal;

    // Schedule preview: walk the balance forward period by period
    let preview_len = SCHEDULE_PREVIEW_PERIODS.min(total_periods);
    let mut schedule_preview = Vec::with_capacity(preview_len as usize);
    let mut balance = input.principal;

    for period in 1..=preview_len {
        let interest = balance * periodic_rate;
        let principal_portion = periodic_repayment - interest;
        balance -= principal_portion;

        schedule_preview.push(SchedulePeriod {
            period,
            principal: principal_portion,
            interest,
            balance: balance.max(Decimal::ZERO),
        });
    }

    let output = RepaymentOutput {
        periodic_repayment,
        total_repayments,
        total_interest,
        schedule_preview,
    };

    Ok(with_metadata(
        "Amortized loan repayment (fixed-payment annuity)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "term_years": input.term_years,
            "frequency": input.frequency,
            "periods_per_year": periods_per_year,
            "total_periods": total_periods,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
