use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use advisor_calc_core::savings::compound_savings::{self, CompoundSavingsInput};
use advisor_calc_core::savings::super_guarantee::{self, SuperGuaranteeInput};
use advisor_calc_core::settings::{resolve_default_rate, CalculatorId};
use advisor_calc_core::types::PayFrequency;
use advisor_calc_core::usage::UsageEvent;

use crate::input;
use crate::CliContext;

#[derive(Debug, Clone, ValueEnum)]
pub enum PayFrequencyArg {
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
}

impl From<PayFrequencyArg> for PayFrequency {
    fn from(arg: PayFrequencyArg) -> Self {
        match arg {
            PayFrequencyArg::Weekly => PayFrequency::Weekly,
            PayFrequencyArg::Fortnightly => PayFrequency::Fortnightly,
            PayFrequencyArg::Monthly => PayFrequency::Monthly,
            PayFrequencyArg::Quarterly => PayFrequency::Quarterly,
        }
    }
}

/// Arguments for the compound savings projection
#[derive(Args)]
pub struct CompoundSavingsArgs {
    /// Starting lump sum
    #[arg(long)]
    pub initial: Option<Decimal>,

    /// Monthly contribution
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,

    /// Nominal annual rate in percent (falls back to stored defaults)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the super guarantee calculator
#[derive(Args)]
pub struct SuperGuaranteeArgs {
    /// Gross annual salary
    #[arg(long)]
    pub salary: Option<Decimal>,

    /// Pay frequency
    #[arg(long, value_enum, default_value = "monthly")]
    pub frequency: PayFrequencyArg,

    /// Guarantee rate in percent (falls back to stored defaults)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of pay periods to total over
    #[arg(long, default_value = "12")]
    pub periods: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compound_savings(
    args: CompoundSavingsArgs,
    ctx: &CliContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: CompoundSavingsInput = input::resolve(args.input.as_deref(), || {
        let initial_amount = args
            .initial
            .ok_or("--input <file.json>, piped JSON, or --initial required")?;
        Ok(CompoundSavingsInput {
            initial_amount,
            monthly_contribution: args.monthly,
            annual_rate_pct: args.rate.unwrap_or_else(|| {
                resolve_default_rate(ctx.settings.as_ref(), CalculatorId::CompoundSavings)
            }),
            years: args.years,
        })
    })?;

    let output = compound_savings::project_compound_savings(&calc_input)?;
    ctx.usage.record(UsageEvent::new(
        CalculatorId::CompoundSavings,
        &calc_input,
        &output.result,
    ));
    Ok(serde_json::to_value(output)?)
}

pub fn run_super_guarantee(
    args: SuperGuaranteeArgs,
    ctx: &CliContext,
) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: SuperGuaranteeInput = input::resolve(args.input.as_deref(), || {
        let gross_annual_salary = args
            .salary
            .ok_or("--input <file.json>, piped JSON, or --salary required")?;
        Ok(SuperGuaranteeInput {
            gross_annual_salary,
            pay_frequency: args.frequency.clone().into(),
            guarantee_rate_pct: args.rate.unwrap_or_else(|| {
                resolve_default_rate(ctx.settings.as_ref(), CalculatorId::SuperGuarantee)
            }),
            number_of_periods: args.periods,
        })
    })?;

    let output = super_guarantee::calculate_super_guarantee(&calc_input)?;
    ctx.usage.record(UsageEvent::new(
        CalculatorId::SuperGuarantee,
        &calc_input,
        &output.result,
    ));
    Ok(serde_json::to_value(output)?)
}
