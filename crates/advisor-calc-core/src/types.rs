use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Percent-valued fields are named
/// `*_rate_pct` and converted at the validation boundary.
pub type Rate = Decimal;

/// How often a loan repayment falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentFrequency {
    Weekly,
    Fortnightly,
    Monthly,
}

impl RepaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            RepaymentFrequency::Weekly => 52,
            RepaymentFrequency::Fortnightly => 26,
            RepaymentFrequency::Monthly => 12,
        }
    }
}

/// Pay cycle for salary-based calculations. Quarterly exists here because
/// super guarantee is assessed on quarterly OTE; loans are never quarterly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
}

impl PayFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PayFrequency::Weekly => 52,
            PayFrequency::Fortnightly => 26,
            PayFrequency::Monthly => 12,
            PayFrequency::Quarterly => 4,
        }
    }
}

/// Loan purpose, which decides the LVR ceiling a lender will accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanPurpose {
    OwnerOccupier,
    Investor,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
