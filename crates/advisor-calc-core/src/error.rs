use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalculatorError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },
}

impl CalculatorError {
    /// Shorthand for the common rejection path.
    pub fn invalid(field: &str, reason: &str) -> Self {
        CalculatorError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
