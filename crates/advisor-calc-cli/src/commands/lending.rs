use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use advisor_calc_core::lending::borrowing_power::{self, BorrowingPowerInput};
use advisor_calc_core::lending::interest_only::{self, InterestOnlyInput};
use advisor_calc_core::lending::refinance::{self, RefinanceInput};
use advisor_calc_core::lending::repayment::{self, RepaymentInput};
use advisor_calc_core::settings::{resolve_default_rate, CalculatorId};
use advisor_calc_core::types::{LoanPurpose, RepaymentFrequency};
use advisor_calc_core::usage::UsageEvent;

use crate::input;
use crate::CliContext;

#[derive(Debug, Clone, ValueEnum)]
pub enum FrequencyArg {
    Weekly,
    Fortnightly,
    Monthly,
}

impl From<FrequencyArg> for RepaymentFrequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Weekly => RepaymentFrequency::Weekly,
            FrequencyArg::Fortnightly => RepaymentFrequency::Fortnightly,
            FrequencyArg::Monthly => RepaymentFrequency::Monthly,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum PurposeArg {
    OwnerOccupier,
    Investor,
}

impl From<PurposeArg> for LoanPurpose {
    fn from(arg: PurposeArg) -> Self {
        match arg {
            PurposeArg::OwnerOccupier => LoanPurpose::OwnerOccupier,
            PurposeArg::Investor => LoanPurpose::Investor,
        }
    }
}

/// Arguments for the loan repayment calculator
#[derive(Args)]
pub struct RepaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate in percent (falls back to stored defaults)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Repayment frequency
    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: FrequencyArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the borrowing power calculator
#[derive(Args)]
pub struct BorrowingPowerArgs {
    /// Annual gross income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Partner's annual gross income
    #[arg(long, default_value = "0")]
    pub partner_income: Decimal,

    /// Other annual income
    #[arg(long, default_value = "0")]
    pub other_income: Decimal,

    /// Monthly living expenses
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Monthly repayments on existing debts
    #[arg(long, default_value = "0")]
    pub debts: Decimal,

    /// Deposit available
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Loan purpose
    #[arg(long, value_enum, default_value = "owner-occupier")]
    pub purpose: PurposeArg,

    /// Nominal annual rate in percent (falls back to stored defaults)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the refinance comparison
#[derive(Args)]
pub struct RefinanceArgs {
    /// Current loan balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Current nominal annual rate in percent
    #[arg(long)]
    pub current_rate: Option<Decimal>,

    /// Current annual package fees
    #[arg(long, default_value = "0")]
    pub current_fees: Decimal,

    /// Proposed nominal annual rate in percent (falls back to stored defaults)
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// Proposed annual package fees
    #[arg(long, default_value = "0")]
    pub new_fees: Decimal,

    /// One-off switching costs
    #[arg(long, default_value = "0")]
    pub costs: Decimal,

    /// Remaining term in years
    #[arg(long, default_value = "25")]
    pub term_years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the interest-only comparison
#[derive(Args)]
pub struct InterestOnlyArgs {
    /// Loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Nominal annual rate in percent (falls back to stored defaults)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Interest-only period in years
    #[arg(long, default_value = "5")]
    pub io_years: u32,

    /// Total loan term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_repayment(
    args: RepaymentArgs,
    ctx: &CliContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: RepaymentInput = input::resolve(args.input.as_deref(), || {
        let principal = args
            .principal
            .ok_or("--input <file.json>, piped JSON, or --principal required")?;
        Ok(RepaymentInput {
            principal,
            annual_rate_pct: args.rate.unwrap_or_else(|| {
                resolve_default_rate(ctx.settings.as_ref(), CalculatorId::LoanRepayment)
            }),
            term_years: args.term_years,
            frequency: args.frequency.clone().into(),
        })
    })?;

    let output = repayment::calculate_repayment(&calc_input)?;
    ctx.usage.record(UsageEvent::new(
        CalculatorId::LoanRepayment,
        &calc_input,
        &output.result,
    ));
    Ok(serde_json::to_value(output)?)
}

pub fn run_borrowing_power(
    args: BorrowingPowerArgs,
    ctx: &CliContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: BorrowingPowerInput = input::resolve(args.input.as_deref(), || {
        let gross_income = args
            .income
            .ok_or("--input <file.json>, piped JSON, or --income required")?;
        let living_expenses = args
            .expenses
            .ok_or("--input <file.json>, piped JSON, or --expenses required")?;
        let deposit = args
            .deposit
            .ok_or("--input <file.json>, piped JSON, or --deposit required")?;
        Ok(BorrowingPowerInput {
            gross_income,
            partner_income: args.partner_income,
            other_income: args.other_income,
            living_expenses,
            existing_debts: args.debts,
            deposit,
            loan_purpose: args.purpose.clone().into(),
            annual_rate_pct: args.rate.unwrap_or_else(|| {
                resolve_default_rate(ctx.settings.as_ref(), CalculatorId::BorrowingPower)
            }),
            term_years: args.term_years,
        })
    })?;

    let output = borrowing_power::estimate_borrowing_power(&calc_input)?;
    ctx.usage.record(UsageEvent::new(
        CalculatorId::BorrowingPower,
        &calc_input,
        &output.result,
    ));
    Ok(serde_json::to_value(output)?)
}

pub fn run_refinance(
    args: RefinanceArgs,
    ctx: &CliContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: RefinanceInput = input::resolve(args.input.as_deref(), || {
        let current_balance = args
            .balance
            .ok_or("--input <file.json>, piped JSON, or --balance required")?;
        let current_rate_pct = args
            .current_rate
            .ok_or("--input <file.json>, piped JSON, or --current-rate required")?;
        Ok(RefinanceInput {
            current_balance,
            current_rate_pct,
            current_annual_fees: args.current_fees,
            new_rate_pct: args.new_rate.unwrap_or_else(|| {
                resolve_default_rate(ctx.settings.as_ref(), CalculatorId::Refinance)
            }),
            new_annual_fees: args.new_fees,
            refinance_costs: args.costs,
            remaining_term_years: args.term_years,
        })
    })?;

    let output = refinance::compare_refinance(&calc_input)?;
    ctx.usage.record(UsageEvent::new(
        CalculatorId::Refinance,
        &calc_input,
        &output.result,
    ));
    Ok(serde_json::to_value(output)?)
}

pub fn run_interest_only(
    args: InterestOnlyArgs,
    ctx: &CliContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: InterestOnlyInput = input::resolve(args.input.as_deref(), || {
        let loan_amount = args
            .amount
            .ok_or("--input <file.json>, piped JSON, or --amount required")?;
        Ok(InterestOnlyInput {
            loan_amount,
            annual_rate_pct: args.rate.unwrap_or_else(|| {
                resolve_default_rate(ctx.settings.as_ref(), CalculatorId::InterestOnly)
            }),
            interest_only_years: args.io_years,
            total_term_years: args.term_years,
        })
    })?;

    let output = interest_only::compare_interest_only(&calc_input)?;
    ctx.usage.record(UsageEvent::new(
        CalculatorId::InterestOnly,
        &calc_input,
        &output.result,
    ));
    Ok(serde_json::to_value(output)?)
}
