use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity;
use crate::error::CalculatorError;
use crate::types::{with_metadata, ComputationOutput, LoanPurpose, Money, Rate};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a borrowing power estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingPowerInput {
    /// Annual gross income of the primary applicant.
    pub gross_income: Money,
    /// Annual gross income of a partner, zero if none.
    pub partner_income: Money,
    /// Other annual income (rent, dividends).
    pub other_income: Money,
    /// Monthly living expenses.
    pub living_expenses: Money,
    /// Monthly repayments on existing debts.
    pub existing_debts: Money,
    pub deposit: Money,
    pub loan_purpose: LoanPurpose,
    /// Nominal annual rate as a percentage (6.5 = 6.5%).
    pub annual_rate_pct: Decimal,
    pub term_years: u32,
}

/// Top-level output from `estimate_borrowing_power`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingPowerOutput {
    pub estimated_borrowing_capacity: Money,
    /// Repayment on the estimated capacity at the *nominal* rate. The
    /// buffered rate sizes the loan, never the displayed repayment.
    pub monthly_repayment: Money,
    pub debt_to_income_ratio: Decimal,
    pub loan_to_value_ratio: Decimal,
    /// Nominal rate plus the serviceability buffer, as a fraction.
    pub serviceability_buffer_rate: Rate,
}

/// Mandated margin over the nominal rate when testing serviceability.
const SERVICEABILITY_BUFFER: Rate = dec!(0.03);

/// At most this share of surplus income may go to the new repayment.
const SURPLUS_SHARE_CAP: Decimal = dec!(0.8);

/// At most this share of gross monthly income may go to the new repayment.
const INCOME_SHARE_CAP: Decimal = dec!(0.3);

fn max_lvr(purpose: LoanPurpose) -> Decimal {
    match purpose {
        LoanPurpose::OwnerOccupier => dec!(0.8),
        LoanPurpose::Investor => dec!(0.7),
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Estimate the largest loan serviceable from income net of expenses and
/// existing debts, under the serviceability buffer and the LVR ceiling for
/// the loan purpose.
pub fn estimate_borrowing_power(
    input: &BorrowingPowerInput,
) -> CalcResult<ComputationOutput<BorrowingPowerOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    for (field, value) in [
        ("gross_income", input.gross_income),
        ("partner_income", input.partner_income),
        ("other_income", input.other_income),
        ("living_expenses", input.living_expenses),
        ("existing_debts", input.existing_debts),
        ("deposit", input.deposit),
    ] {
        if value < Decimal::ZERO {
            return Err(CalculatorError::invalid(field, "must be >= 0"));
        }
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

    let total_annual_income = input.gross_income + input.partner_income + input.other_income;
    let monthly_income = total_annual_income / dec!(12);
    let available_income = monthly_income - input.living_expenses - input.existing_debts;

    let nominal_rate = input.annual_rate_pct / dec!(100);
    let buffered_rate = nominal_rate + SERVICEABILITY_BUFFER;
    let total_months = input.term_years * 12;

    // Two independent caps; whichever is lower binds.
    let max_monthly_repayment =
        (available_income * SURPLUS_SHARE_CAP).min(monthly_income * INCOME_SHARE_CAP);

    if max_monthly_repayment <= Decimal::ZERO {
        warnings.push(
            "Expenses and existing debts leave no income for a new repayment; capacity is zero"
                .into(),
        );
        let output = BorrowingPowerOutput {
            estimated_borrowing_capacity: Decimal::ZERO,
            monthly_repayment: Decimal::ZERO,
            debt_to_income_ratio: ratio_or_zero(
                input.existing_debts * dec!(12),
                total_annual_income,
            ),
            loan_to_value_ratio: Decimal::ZERO,
            serviceability_buffer_rate: buffered_rate,
        };
        return Ok(envelope(input, buffered_rate, warnings, output));
    }

    // Serviceability: invert the annuity at the buffered rate.
    let serviceable_principal = annuity::max_principal(
        max_monthly_repayment,
        buffered_rate / dec!(12),
        total_months,
    )?;

    // LVR ceiling: loan / (loan + deposit) <= max_lvr puts a hard cap on
    // the loan the deposit can support.
    let lvr_ceiling = max_lvr(input.loan_purpose);
    let deposit_supported_principal =
        input.deposit * lvr_ceiling / (Decimal::ONE - lvr_ceiling);
    let capacity = serviceable_principal.min(deposit_supported_principal);
    if capacity < serviceable_principal {
        warnings.push(format!(
            "Capacity limited by the {}% LVR ceiling for this loan purpose",
            lvr_ceiling * dec!(100)
        ));
    }

    // Displayed repayment is at the nominal rate, not the buffered one.
    let monthly_repayment = if capacity > Decimal::ZERO {
        annuity::periodic_payment(capacity, nominal_rate / dec!(12), total_months)?
    } else {
        Decimal::ZERO
    };

    let debt_to_income_ratio = ratio_or_zero(
        (monthly_repayment + input.existing_debts) * dec!(12),
        total_annual_income,
    );
    let loan_to_value_ratio = ratio_or_zero(capacity, capacity + input.deposit);

    let output = BorrowingPowerOutput {
        estimated_borrowing_capacity: capacity,
        monthly_repayment,
        debt_to_income_ratio,
        loan_to_value_ratio,
        serviceability_buffer_rate: buffered_rate,
    };

    Ok(envelope(input, buffered_rate, warnings, output))
}

fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

fn envelope(
    input: &BorrowingPowerInput,
    buffered_rate: Rate,
    warnings: Vec<String>,
    output: BorrowingPowerOutput,
) -> ComputationOutput<BorrowingPowerOutput> {
    with_metadata(
        "Borrowing power (buffered-rate serviceability with LVR ceiling)",
        &serde_json::json!({
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "serviceability_rate": buffered_rate.to_string(),
            "loan_purpose": input.loan_purpose,
            "term_years": input.term_years,
            "lvr_ceiling": max_lvr(input.loan_purpose).to_string(),
        }),
        warnings,
        output,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn default_input() -> BorrowingPowerInput {
        BorrowingPowerInput {
            gross_income: dec!(80_000),
            partner_income: Decimal::ZERO,
            other_income: Decimal::ZERO,
            living_expenses: dec!(3000),
            existing_debts: dec!(500),
            deposit: dec!(100_000),
            loan_purpose: LoanPurpose::OwnerOccupier,
            annual_rate_pct: dec!(6.5),
            term_years: 30,
        }
    }

    #[test]
    fn test_single_income_household_capacity() {
        let result = estimate_borrowing_power(&default_input()).unwrap();
        let out = &result.result;

        assert!(out.estimated_borrowing_capacity > Decimal::ZERO);
        // Sanity ceiling: well under six times income
        assert!(out.estimated_borrowing_capacity < dec!(480_000));
        // LVR cap honored
        assert!(out.loan_to_value_ratio < dec!(0.8));
        assert!(out.loan_to_value_ratio > Decimal::ZERO);
    }

    #[test]
    fn test_buffer_is_three_points_over_nominal() {
        let result = estimate_borrowing_power(&default_input()).unwrap();
        assert_eq!(result.result.serviceability_buffer_rate, dec!(0.095));
    }

    #[test]
    fn test_repayment_priced_at_nominal_rate() {
        // The displayed repayment must re-amortize the capacity at the
        // nominal rate, not the buffered one.
        let result = estimate_borrowing_power(&default_input()).unwrap();
        let out = &result.result;

        let expected = annuity::periodic_payment(
            out.estimated_borrowing_capacity,
            dec!(6.5) / dec!(100) / dec!(12),
            360,
        )
        .unwrap();
        assert_eq!(out.monthly_repayment, expected);

        let buffered = annuity::periodic_payment(
            out.estimated_borrowing_capacity,
            dec!(0.095) / dec!(12),
            360,
        )
        .unwrap();
        assert!(out.monthly_repayment < buffered);
    }

    #[test]
    fn test_income_share_cap_binds_here() {
        // 80k/yr: surplus cap = (6666.67-3500)*0.8 = 2533, income cap =
        // 6666.67*0.3 = 2000, so the income cap is the lower of the two.
        let result = estimate_borrowing_power(&default_input()).unwrap();
        let out = &result.result;

        let capacity_at_2000 =
            annuity::max_principal(dec!(2000), dec!(0.095) / dec!(12), 360).unwrap();
        assert!(
            (out.estimated_borrowing_capacity - capacity_at_2000).abs() < dec!(0.01),
            "capacity={}",
            out.estimated_borrowing_capacity
        );
    }

    #[test]
    fn test_investor_lvr_ceiling_is_tighter() {
        let owner = estimate_borrowing_power(&default_input()).unwrap();

        let mut input = default_input();
        input.loan_purpose = LoanPurpose::Investor;
        let investor = estimate_borrowing_power(&input).unwrap();

        // 100k deposit at 70% LVR supports at most 233,333
        let deposit_cap = dec!(100_000) * dec!(0.7) / dec!(0.3);
        assert!(
            investor.result.estimated_borrowing_capacity
                < owner.result.estimated_borrowing_capacity
        );
        assert!(
            (investor.result.estimated_borrowing_capacity - deposit_cap).abs() < dec!(0.01)
        );
        assert!(!investor.warnings.is_empty());
    }

    #[test]
    fn test_capacity_non_increasing_in_expenses() {
        let base = estimate_borrowing_power(&default_input()).unwrap();

        let mut input = default_input();
        input.living_expenses = dec!(4000);
        let tighter = estimate_borrowing_power(&input).unwrap();

        assert!(
            tighter.result.estimated_borrowing_capacity
                <= base.result.estimated_borrowing_capacity
        );
    }

    #[test]
    fn test_expenses_exceed_income_clamps_to_zero() {
        let mut input = default_input();
        input.living_expenses = dec!(7000);

        let result = estimate_borrowing_power(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.estimated_borrowing_capacity, Decimal::ZERO);
        assert_eq!(out.monthly_repayment, Decimal::ZERO);
        assert_eq!(out.loan_to_value_ratio, Decimal::ZERO);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_zero_income_clamps_to_zero() {
        let mut input = default_input();
        input.gross_income = Decimal::ZERO;
        input.living_expenses = Decimal::ZERO;
        input.existing_debts = Decimal::ZERO;

        let result = estimate_borrowing_power(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.estimated_borrowing_capacity, Decimal::ZERO);
        assert_eq!(out.debt_to_income_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_partner_income_raises_capacity() {
        let base = estimate_borrowing_power(&default_input()).unwrap();

        let mut input = default_input();
        input.partner_income = dec!(60_000);
        let dual = estimate_borrowing_power(&input).unwrap();

        assert!(
            dual.result.estimated_borrowing_capacity
                > base.result.estimated_borrowing_capacity
        );
    }

    #[test]
    fn test_no_deposit_means_no_loan_under_lvr_cap() {
        let mut input = default_input();
        input.deposit = Decimal::ZERO;

        let result = estimate_borrowing_power(&input).unwrap();
        assert_eq!(result.result.estimated_borrowing_capacity, Decimal::ZERO);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_validation_rejects_negative_amounts() {
        let mut input = default_input();
        input.partner_income = dec!(-1);
        assert!(estimate_borrowing_power(&input).is_err());

        let mut input = default_input();
        input.deposit = dec!(-1);
        assert!(estimate_borrowing_power(&input).is_err());

        let mut input = default_input();
        input.term_years = 0;
        assert!(estimate_borrowing_power(&input).is_err());
    }
}
