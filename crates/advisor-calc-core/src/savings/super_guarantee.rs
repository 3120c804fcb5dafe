use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;
use crate::types::{with_metadata, ComputationOutput, Money, PayFrequency};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a super guarantee contribution calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperGuaranteeInput {
    pub gross_annual_salary: Money,
    pub pay_frequency: PayFrequency,
    /// Guarantee rate as a percentage (12 = 12%).
    pub guarantee_rate_pct: Decimal,
    /// Pay periods to total over; capped at one year's worth for the
    /// chosen frequency.
    pub number_of_periods: u32,
}

/// Top-level output from `calculate_super_guarantee`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperGuaranteeOutput {
    pub contribution_per_period: Money,
    pub total_contribution: Money,
    /// Up to 12 periods of OTE and contribution. Salary is treated as
    /// uniform across periods, so every row carries the same amounts.
    pub period_breakdown: Vec<PeriodContribution>,
}

/// One pay period's OTE and guarantee contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodContribution {
    pub period: u32,
    pub ordinary_time_earnings: Money,
    pub contribution: Money,
}

const BREAKDOWN_MAX_PERIODS: u32 = 12;

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the guarantee contribution per pay period and the total over
/// the requested number of periods within a single year.
pub fn calculate_super_guarantee(
    input: &SuperGuaranteeInput,
) -> CalcResult<ComputationOutput<SuperGuaranteeOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.gross_annual_salary < Decimal::ZERO {
        return Err(CalculatorError::invalid(
            "gross_annual_salary",
            "salary must be >= 0",
        ));
    }
    if input.guarantee_rate_pct < Decimal::ZERO || input.guarantee_rate_pct > dec!(100) {
        return Err(CalculatorError::invalid(
            "guarantee_rate_pct",
            "guarantee rate must be between 0 and 100 percent",
        ));
    }
    if input.number_of_periods == 0 {
        return Err(CalculatorError::invalid(
            "number_of_periods",
            "number of periods must be > 0",
        ));
    }

    let periods_per_year = input.pay_frequency.periods_per_year();
    let ote_per_period = input.gross_annual_salary / Decimal::from(periods_per_year);
    let contribution_per_period = ote_per_period * input.guarantee_rate_pct / dec!(100);

    // Requesting more periods than the year holds does not extrapolate
    // into a second year.
    let counted_periods = input.number_of_periods.min(periods_per_year);
    if counted_periods < input.number_of_periods {
        warnings.push(format!(
            "Periods capped at {} (one year at this pay frequency)",
            periods_per_year
        ));
    }

    let total_contribution = contribution_per_period * Decimal::from(counted_periods);

    let breakdown_len = counted_periods.min(BREAKDOWN_MAX_PERIODS);
    let period_breakdown = (1..=breakdown_len)
        .map(|period| PeriodContribution {
            period,
            ordinary_time_earnings: ote_per_period,
            contribution: contribution_per_period,
        })
        .collect();

    let output = SuperGuaranteeOutput {
        contribution_per_period,
        total_contribution,
        period_breakdown,
    };

    Ok(with_metadata(
        "Super guarantee (uniform OTE per pay period)",
        &serde_json::json!({
            "gross_annual_salary": input.gross_annual_salary.to_string(),
            "pay_frequency": input.pay_frequency,
            "guarantee_rate_pct": input.guarantee_rate_pct.to_string(),
            "periods_per_year": periods_per_year,
            "counted_periods": counted_periods,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
