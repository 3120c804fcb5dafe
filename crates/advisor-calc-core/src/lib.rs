pub mod annuity;
pub mod error;
pub mod settings;
pub mod types;
pub mod usage;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "savings")]
pub mod savings;

pub use error::CalculatorError;
pub use types::*;

/// Standard result type for all calculator operations
pub type CalcResult<T> = Result<T, CalculatorError>;
