mod commands;
mod config;
mod input;
mod output;
mod usage_log;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use advisor_calc_core::settings::{EmptyStore, SettingsStore};
use advisor_calc_core::usage::{NullSink, UsageSink};

use commands::lending::{BorrowingPowerArgs, InterestOnlyArgs, RefinanceArgs, RepaymentArgs};
use commands::savings::{CompoundSavingsArgs, SuperGuaranteeArgs};

/// Financial-advisory calculators
#[derive(Parser)]
#[command(
    name = "advcalc",
    version,
    about = "Financial-advisory calculators",
    long_about = "Deterministic financial calculators with decimal precision: loan \
                  repayments, borrowing power, refinance comparison, interest-only \
                  vs P&I, compound savings, and super guarantee contributions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a JSON settings file with stored calculator defaults
    #[arg(long, global = true)]
    settings: Option<String>,

    /// Append a usage event for each calculation to this JSON-lines file
    #[arg(long, global = true)]
    usage_log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortized loan repayment with a schedule preview
    Repayment(RepaymentArgs),
    /// Estimate borrowing capacity from income and expenses
    BorrowingPower(BorrowingPowerArgs),
    /// Compare an existing loan against a refinance offer
    Refinance(RefinanceArgs),
    /// Compare interest-only against principal-and-interest
    InterestOnly(InterestOnlyArgs),
    /// Project a lump sum plus monthly savings contributions
    CompoundSavings(CompoundSavingsArgs),
    /// Super guarantee contributions per pay period
    SuperGuarantee(SuperGuaranteeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Collaborators every command runs against: stored defaults and the
/// usage-event sink.
pub struct CliContext {
    pub settings: Box<dyn SettingsStore>,
    pub usage: Box<dyn UsageSink>,
}

impl CliContext {
    fn from_flags(settings: Option<&str>, usage_log: Option<&str>) -> Self {
        let settings: Box<dyn SettingsStore> = match settings {
            Some(path) => Box::new(config::FileSettings::load(path)),
            None => Box::new(EmptyStore),
        };
        let usage: Box<dyn UsageSink> = match usage_log {
            Some(path) => Box::new(usage_log::JsonlSink::new(path)),
            None => Box::new(NullSink),
        };
        CliContext { settings, usage }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let ctx = CliContext::from_flags(cli.settings.as_deref(), cli.usage_log.as_deref());

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Repayment(args) => commands::lending::run_repayment(args, &ctx),
        Commands::BorrowingPower(args) => commands::lending::run_borrowing_power(args, &ctx),
        Commands::Refinance(args) => commands::lending::run_refinance(args, &ctx),
        Commands::InterestOnly(args) => commands::lending::run_interest_only(args, &ctx),
        Commands::CompoundSavings(args) => commands::savings::run_compound_savings(args, &ctx),
        Commands::SuperGuarantee(args) => commands::savings::run_super_guarantee(args, &ctx),
        Commands::Version => {
            println!("advcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
