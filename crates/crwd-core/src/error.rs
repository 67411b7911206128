//! Error handling for donation-split sessions
//!
//! The split arithmetic itself never fails. Errors come from opening a
//! session with unusable inputs, from addressing a cause the session does not
//! know, from configuration, and from the persistence gateway.

use crate::gateway::GatewayError;
use crwd_types::CauseId;
use thiserror::Error;

pub type SplitResult<T> = Result<T, SplitError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    /// Monthly amount was zero, negative or not a number
    #[error("Invalid monthly amount: {amount}")]
    InvalidMonthlyAmount { amount: f64 },

    /// A donation box needs at least one cause
    #[error("Donation box has no causes")]
    NoCauses,

    /// The same cause was supplied twice
    #[error("Cause {cause_id} appears more than once")]
    DuplicateCause { cause_id: CauseId },

    /// Every cause at the floor would already exceed 100%
    #[error("Minimum of {floor:.2}% per cause cannot be met by {cause_count} causes")]
    InfeasibleFloor { cause_count: usize, floor: f64 },

    /// The session has no cause with this id
    #[error("Unknown cause: {cause_id}")]
    UnknownCause { cause_id: CauseId },

    /// Text was typed into an input that does not have focus
    #[error("Input for cause {cause_id} is not focused")]
    NotFocused { cause_id: CauseId },

    /// Configuration could not be read or failed validation
    #[error("Configuration error: {message}")]
    Configuration { message: String, setting: Option<String> },

    /// The persistence gateway refused or failed the save
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SplitError {
    pub fn configuration(message: impl Into<String>, setting: Option<&str>) -> Self {
        SplitError::Configuration { message: message.into(), setting: setting.map(str::to_string) }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SplitError::InvalidMonthlyAmount { .. }
            | SplitError::NoCauses
            | SplitError::DuplicateCause { .. }
            | SplitError::InfeasibleFloor { .. } => "seed",
            SplitError::UnknownCause { .. } | SplitError::NotFocused { .. } => "edit",
            SplitError::Configuration { .. } => "configuration",
            SplitError::Gateway(_) => "gateway",
        }
    }

    /// Whether the session stays usable after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SplitError::UnknownCause { .. } | SplitError::NotFocused { .. } => true,
            SplitError::Gateway(err) => err.is_retryable(),
            _ => false,
        }
    }
}
