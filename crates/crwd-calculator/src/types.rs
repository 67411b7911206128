use serde::{Deserialize, Serialize};
use std::fmt;

// Calculator error handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorError {
    pub code: ErrorCode,
    pub message: String,
}

impl CalculatorError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl std::error::Error for CalculatorError {}

impl fmt::Display for CalculatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Calculator error: {}", self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Monthly amount was zero, negative or not finite
    InvalidMonthlyAmount,
    /// Floor policy constants are out of range
    InvalidPolicy,
}
