use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity::compound;
use crate::error::CalculatorError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a compound savings projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundSavingsInput {
    pub initial_amount: Money,
    pub monthly_contribution: Money,
    /// Nominal annual rate as a percentage.
    pub annual_rate_pct: Decimal,
    pub years: u32,
}

/// Top-level output from `project_compound_savings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundSavingsOutput {
    pub final_balance: Money,
    pub total_contributions: Money,
    pub total_growth: Money,
    /// One entry per year, capped at the first 10 years.
    pub yearly_breakdown: Vec<YearlyBalance>,
}

/// Projected position at the end of a given year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyBalance {
    pub year: u32,
    pub balance: Money,
    pub contributions: Money,
    pub growth: Money,
}

const BREAKDOWN_MAX_YEARS: u32 = 10;

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a lump sum plus a level monthly contribution stream. The lump
/// sum compounds annually and the contribution stream monthly, matching the
/// published calculator.
pub fn project_compound_savings(
    input: &CompoundSavingsInput,
) -> CalcResult<ComputationOutput<CompoundSavingsOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.initial_amount < Decimal::ZERO {
        return Err(CalculatorError::invalid(
            "initial_amount",
            "initial amount must be >= 0",
        ));
    }
    if input.monthly_contribution < Decimal::ZERO {
        return Err(CalculatorError::invalid(
            "monthly_contribution",
            "monthly contribution must be >= 0",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO || input.annual_rate_pct > dec!(100) {
        return Err(CalculatorError::invalid(
            "annual_rate_pct",
            "annual rate must be between 0 and 100 percent",
        ));
    }
    if input.years == 0 {
        return Err(CalculatorError::invalid(
            "years",
            "projection horizon must be > 0 years",
        ));
    }

    let annual_rate = input.annual_rate_pct / dec!(100);
    let monthly_rate = annual_rate / dec!(12);

    if annual_rate.is_zero() {
        warnings.push("Zero rate: balance grows by contributions only".into());
    }

    let final_balance = balance_at_year(input, annual_rate, monthly_rate, input.years);
    let total_contributions =
        input.initial_amount + input.monthly_contribution * Decimal::from(input.years * 12);
    let total_growth = final_balance - total_contributions;

    let breakdown_years = input.years.min(BREAKDOWN_MAX_YEARS);
    let mut yearly_breakdown = Vec::with_capacity(breakdown_years as usize);
    for year in 1..=breakdown_years {
        let balance = balance_at_year(input, annual_rate, monthly_rate, year);
        let contributions =
            input.initial_amount + input.monthly_contribution * Decimal::from(year * 12);
        yearly_breakdown.push(YearlyBalance {
            year,
            balance,
            contributions,
            growth: balance - contributions,
        });
    }

    let output = CompoundSavingsOutput {
        final_balance,
        total_contributions,
        total_growth,
        yearly_breakdown,
    };

    Ok(with_metadata(
        "Compound savings projection (lump sum compounded annually, contributions monthly)",
        &serde_json::json!({
            "initial_amount": input.initial_amount.to_string(),
            "monthly_contribution": input.monthly_contribution.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "years": input.years,
        }),
        warnings,
        output,
    ))
}

/// Balance after `year` years: initial·(1+R)^year plus the future value of
/// the monthly stream. Zero-rate contributions accumulate linearly.
fn balance_at_year(
    input: &CompoundSavingsInput,
    annual_rate: Rate,
    monthly_rate: Rate,
    year: u32,
) -> Money {
    let months = year * 12;
    let lump_sum = input.initial_amount * compound(annual_rate, year);
    let stream = if monthly_rate.is_zero() {
        input.monthly_contribution * Decimal::from(months)
    } else {
        input.monthly_contribution * (compound(monthly_rate, months) - Decimal::ONE)
            / monthly_rate
    };
    lump_sum + stream
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn default_input() -> CompoundSavingsInput {
        CompoundSavingsInput {
            initial_amount: dec!(10_000),
            monthly_contribution: dec!(500),
            annual_rate_pct: dec!(5.5),
            years: 10,
        }
    }

    #[test]
    fn test_ten_year_projection() {
        let result = project_compound_savings(&default_input()).unwrap();
        let out = &result.result;

        // 10k at 5.5% annually plus 500/mo at 5.5%/12 over 120 months
        assert!(
            (out.final_balance - dec!(96_840)).abs() < dec!(50),
            "balance={}",
            out.final_balance
        );
        assert_eq!(out.total_contributions, dec!(70_000));
        assert_eq!(out.total_growth, out.final_balance - dec!(70_000));
    }

    #[test]
    fn test_growth_positive_for_positive_rate() {
        let result = project_compound_savings(&default_input()).unwrap();
        assert!(result.result.total_growth > Decimal::ZERO);
    }

    #[test]
    fn test_breakdown_one_entry_per_year() {
        let result = project_compound_savings(&default_input()).unwrap();
        let breakdown = &result.result.yearly_breakdown;

        assert_eq!(breakdown.len(), 10);
        for (i, entry) in breakdown.iter().enumerate() {
            assert_eq!(entry.year, i as u32 + 1);
            assert_eq!(entry.growth, entry.balance - entry.contributions);
        }
    }

    #[test]
    fn test_breakdown_final_year_matches_headline() {
        let result = project_compound_savings(&default_input()).unwrap();
        let out = &result.result;

        let last = out.yearly_breakdown.last().unwrap();
        assert_eq!(last.balance, out.final_balance);
        assert_eq!(last.contributions, out.total_contributions);
    }

    #[test]
    fn test_breakdown_caps_at_ten_years() {
        let mut input = default_input();
        input.years = 25;

        let result = project_compound_savings(&input).unwrap();
        assert_eq!(result.result.yearly_breakdown.len(), 10);
        // Headline still covers the full horizon
        let year_10 = result.result.yearly_breakdown.last().unwrap();
        assert!(result.result.final_balance > year_10.balance);
    }

    #[test]
    fn test_short_horizon_breakdown() {
        let mut input = default_input();
        input.years = 3;

        let result = project_compound_savings(&input).unwrap();
        assert_eq!(result.result.yearly_breakdown.len(), 3);
    }

    #[test]
    fn test_balance_grows_year_on_year() {
        let result = project_compound_savings(&default_input()).unwrap();
        let breakdown = &result.result.yearly_breakdown;

        for pair in breakdown.windows(2) {
            assert!(pair[1].balance > pair[0].balance);
        }
    }

    #[test]
    fn test_zero_rate_is_contributions_only() {
        let mut input = default_input();
        input.annual_rate_pct = Decimal::ZERO;

        let result = project_compound_savings(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.final_balance, dec!(70_000));
        assert_eq!(out.total_growth, Decimal::ZERO);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_no_contributions_pure_lump_sum() {
        let mut input = default_input();
        input.monthly_contribution = Decimal::ZERO;

        let result = project_compound_savings(&input).unwrap();
        let expected = dec!(10_000) * compound(dec!(0.055), 10);
        assert_eq!(result.result.final_balance, expected);
    }

    #[test]
    fn test_no_lump_sum_pure_stream() {
        let mut input = default_input();
        input.initial_amount = Decimal::ZERO;

        let result = project_compound_savings(&input).unwrap();
        assert_eq!(result.result.total_contributions, dec!(60_000));
        assert!(result.result.final_balance > dec!(60_000));
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        let mut input = default_input();
        input.initial_amount = dec!(-1);
        assert!(project_compound_savings(&input).is_err());

        let mut input = default_input();
        input.monthly_contribution = dec!(-1);
        assert!(project_compound_savings(&input).is_err());

        let mut input = default_input();
        input.years = 0;
        assert!(project_compound_savings(&input).is_err());

        let mut input = default_input();
        input.annual_rate_pct = dec!(101);
        assert!(project_compound_savings(&input).is_err());
    }
}
