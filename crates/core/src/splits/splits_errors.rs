//! Split workflow error types.

use thiserror::Error;

use super::SplitSessionState;

/// Reasons a ratio typed by the user cannot be used.
///
/// The display strings are shown verbatim next to the ratio field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioError {
    #[error("Invalid format. Use format like '1/2' or '2:1'")]
    InvalidFormat,

    #[error("Both numbers must be positive")]
    NonPositive,
}

/// Errors raised by the split preview/submit workflow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error("{0}")]
    Ratio(#[from] RatioError),

    /// No lots are loaded for the selected security.
    #[error("No holding lots loaded for security {0}")]
    NoLots(String),

    /// A workflow action was attempted from a state that does not allow it.
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: SplitSessionState,
        action: &'static str,
    },

    /// Scaling a lot by the ratio overflows the decimal range.
    #[error("Lot {lot_id} cannot be adjusted by {ratio}: result is too large")]
    ValueOverflow { lot_id: String, ratio: String },

    /// A hand edit would leave a row with a non-positive quantity or negative price.
    #[error("Invalid value for row {index}: {message}")]
    InvalidEdit { index: usize, message: String },

    #[error("Preview row {index} does not exist ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// At least one row fails the value-conservation check.
    #[error("Split submission blocked: {} row(s) fail the value check", .invalid_rows.len())]
    SubmissionBlocked { invalid_rows: Vec<usize> },

    #[error("Split submission failed: {0}")]
    SubmissionFailed(String),
}

impl SplitError {
    pub fn invalid_transition(from: SplitSessionState, action: &'static str) -> Self {
        Self::InvalidTransition { from, action }
    }
}
