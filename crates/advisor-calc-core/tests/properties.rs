//! Cross-calculator properties: arithmetic identities, monotonicity, and
//! idempotence over randomized inputs.

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use advisor_calc_core::lending::borrowing_power::{
    estimate_borrowing_power, BorrowingPowerInput,
};
use advisor_calc_core::lending::interest_only::{compare_interest_only, InterestOnlyInput};
use advisor_calc_core::lending::repayment::{calculate_repayment, RepaymentInput};
use advisor_calc_core::savings::compound_savings::{
    project_compound_savings, CompoundSavingsInput,
};
use advisor_calc_core::savings::super_guarantee::{
    calculate_super_guarantee, SuperGuaranteeInput,
};
use advisor_calc_core::types::{LoanPurpose, PayFrequency, RepaymentFrequency};

fn pct_from_bp(bp: u32) -> Decimal {
    Decimal::from(bp) / dec!(100)
}

fn frequency(ix: u8) -> RepaymentFrequency {
    match ix % 3 {
        0 => RepaymentFrequency::Weekly,
        1 => RepaymentFrequency::Fortnightly,
        _ => RepaymentFrequency::Monthly,
    }
}

fn pay_frequency(ix: u8) -> PayFrequency {
    match ix % 4 {
        0 => PayFrequency::Weekly,
        1 => PayFrequency::Fortnightly,
        2 => PayFrequency::Monthly,
        _ => PayFrequency::Quarterly,
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(48))]

    #[test]
    fn prop_repayment_totals_identity(
        principal in 10_000u32..2_000_000,
        rate_bp in 0u32..1500,
        term_years in 1u32..41,
        freq_ix in 0u8..3
    ) {
        let input = RepaymentInput {
            principal: Decimal::from(principal),
            annual_rate_pct: pct_from_bp(rate_bp),
            term_years,
            frequency: frequency(freq_ix),
        };
        let out = calculate_repayment(&input).unwrap().result;

        let periods = term_years * frequency(freq_ix).periods_per_year();
        prop_assert_eq!(
            out.total_interest,
            out.periodic_repayment * Decimal::from(periods) - Decimal::from(principal)
        );
        if rate_bp == 0 {
            // Straight-line repayment: the total only misses zero by a
            // repeating-decimal residual
            prop_assert!(out.total_interest.abs() < dec!(0.000001));
        } else {
            prop_assert!(out.total_interest > Decimal::ZERO);
        }
        prop_assert_eq!(
            out.schedule_preview.len() as u32,
            periods.min(12)
        );
    }

    #[test]
    fn prop_interest_only_never_cheaper(
        amount in 50_000u32..2_000_000,
        rate_bp in 1u32..1500,
        io_years in 1u32..10,
        extra_years in 1u32..31
    ) {
        let input = InterestOnlyInput {
            loan_amount: Decimal::from(amount),
            annual_rate_pct: pct_from_bp(rate_bp),
            interest_only_years: io_years,
            total_term_years: io_years + extra_years,
        };
        let out = compare_interest_only(&input).unwrap().result;

        prop_assert!(
            out.cost_difference >= Decimal::ZERO,
            "deferring principal came out cheaper: {}",
            out.cost_difference
        );
    }

    #[test]
    fn prop_compound_growth_non_negative(
        initial in 0u32..500_000,
        monthly in 0u32..5_000,
        rate_bp in 1u32..1200,
        years in 1u32..41
    ) {
        let input = CompoundSavingsInput {
            initial_amount: Decimal::from(initial),
            monthly_contribution: Decimal::from(monthly),
            annual_rate_pct: pct_from_bp(rate_bp),
            years,
        };
        let out = project_compound_savings(&input).unwrap().result;

        prop_assert!(out.total_growth >= Decimal::ZERO);
    }

    #[test]
    fn prop_compound_balance_monotone_in_inputs(
        initial in 0u32..500_000,
        monthly in 0u32..5_000,
        rate_bp in 1u32..1200,
        years in 1u32..31
    ) {
        let base = CompoundSavingsInput {
            initial_amount: Decimal::from(initial),
            monthly_contribution: Decimal::from(monthly),
            annual_rate_pct: pct_from_bp(rate_bp),
            years,
        };
        let base_balance = project_compound_savings(&base).unwrap().result.final_balance;

        let mut more_contribution = base.clone();
        more_contribution.monthly_contribution += dec!(100);
        let mut more_initial = base.clone();
        more_initial.initial_amount += dec!(1000);
        let mut higher_rate = base.clone();
        higher_rate.annual_rate_pct += dec!(0.5);

        prop_assert!(
            project_compound_savings(&more_contribution).unwrap().result.final_balance
                > base_balance
        );
        prop_assert!(
            project_compound_savings(&more_initial).unwrap().result.final_balance
                > base_balance
        );
        prop_assert!(
            project_compound_savings(&higher_rate).unwrap().result.final_balance
                >= base_balance
        );
    }

    #[test]
    fn prop_super_guarantee_capping_exact(
        salary in 0u32..300_000,
        rate_bp in 0u32..2000,
        periods in 1u32..120,
        freq_ix in 0u8..4
    ) {
        let freq = pay_frequency(freq_ix);
        let input = SuperGuaranteeInput {
            gross_annual_salary: Decimal::from(salary),
            pay_frequency: freq,
            guarantee_rate_pct: pct_from_bp(rate_bp),
            number_of_periods: periods,
        };
        let out = calculate_super_guarantee(&input).unwrap().result;

        let counted = periods.min(freq.periods_per_year());
        prop_assert_eq!(
            out.total_contribution,
            out.contribution_per_period * Decimal::from(counted)
        );
    }

    #[test]
    fn prop_borrowing_power_lvr_bounded_and_monotone(
        income in 30_000u32..400_000,
        expenses in 0u32..8_000,
        debts in 0u32..4_000,
        deposit in 10_000u32..500_000,
        rate_bp in 100u32..1200,
        investor in 0u8..2
    ) {
        let base = BorrowingPowerInput {
            gross_income: Decimal::from(income),
            partner_income: Decimal::ZERO,
            other_income: Decimal::ZERO,
            living_expenses: Decimal::from(expenses),
            existing_debts: Decimal::from(debts),
            deposit: Decimal::from(deposit),
            loan_purpose: if investor == 0 {
                LoanPurpose::OwnerOccupier
            } else {
                LoanPurpose::Investor
            },
            annual_rate_pct: pct_from_bp(rate_bp),
            term_years: 30,
        };
        let out = estimate_borrowing_power(&base).unwrap().result;

        prop_assert!(out.loan_to_value_ratio >= Decimal::ZERO);
        prop_assert!(out.loan_to_value_ratio < Decimal::ONE);
        prop_assert!(out.estimated_borrowing_capacity >= Decimal::ZERO);

        let mut tighter = base.clone();
        tighter.living_expenses += dec!(500);
        let squeezed = estimate_borrowing_power(&tighter).unwrap().result;
        prop_assert!(
            squeezed.estimated_borrowing_capacity <= out.estimated_borrowing_capacity
        );

        let mut indebted = base;
        indebted.existing_debts += dec!(500);
        let squeezed = estimate_borrowing_power(&indebted).unwrap().result;
        prop_assert!(
            squeezed.estimated_borrowing_capacity <= out.estimated_borrowing_capacity
        );
    }

    #[test]
    fn prop_repayment_idempotent(
        principal in 10_000u32..2_000_000,
        rate_bp in 0u32..1500,
        term_years in 1u32..41,
        freq_ix in 0u8..3
    ) {
        let input = RepaymentInput {
            principal: Decimal::from(principal),
            annual_rate_pct: pct_from_bp(rate_bp),
            term_years,
            frequency: frequency(freq_ix),
        };
        let first = serde_json::to_value(calculate_repayment(&input).unwrap()).unwrap();
        let second = serde_json::to_value(calculate_repayment(&input).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
