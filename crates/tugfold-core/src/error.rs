//! Error types and error code constants for tugfold.
//!
//! [`FoldError`] is the single error type returned across the engine's public
//! seams. Failing to *match* is never an error: matchers return `None`, and a
//! fix whose target went stale returns a "not applicable" outcome. Errors are
//! reserved for cancellation, bad configuration, and rewrites that would
//! break the document.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad configuration, unknown rule id)
//! - `4`: Apply errors (rewritten tree could not be turned into a document)
//! - `5`: Verification failed (rewrite introduced parse errors)
//! - `6`: Cancelled
//! - `10`: Internal errors

use std::fmt;

use thiserror::Error;

use crate::cancel::Cancelled;

pub use crate::types::Location;

/// Stable numeric codes for [`FoldError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad configuration, unknown rule).
    InvalidArguments = 2,
    /// Apply errors.
    ApplyError = 4,
    /// Verification failed after rewriting.
    VerificationFailed = 5,
    /// The operation was cancelled.
    Cancelled = 6,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the engine.
#[derive(Debug, Error)]
pub enum FoldError {
    /// The caller's cancellation token fired.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    /// Configuration could not be loaded or is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// No rule is registered under the given descriptor id.
    #[error("unknown rule '{id}'")]
    UnknownRule { id: String },

    /// The rewritten document has more parse errors than the original.
    #[error("verification failed for {file}: {before} parse error(s) before, {after} after")]
    VerificationFailed {
        file: String,
        before: usize,
        after: usize,
    },

    /// A rewrite could not be spliced back into the document.
    #[error("apply error: {message}")]
    ApplyError { message: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl From<&FoldError> for OutputErrorCode {
    fn from(err: &FoldError) -> Self {
        match err {
            FoldError::Cancelled(_) => OutputErrorCode::Cancelled,
            FoldError::InvalidConfig { .. } => OutputErrorCode::InvalidArguments,
            FoldError::UnknownRule { .. } => OutputErrorCode::InvalidArguments,
            FoldError::VerificationFailed { .. } => OutputErrorCode::VerificationFailed,
            FoldError::ApplyError { .. } => OutputErrorCode::ApplyError,
            FoldError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl FoldError {
    /// Create an apply error.
    pub fn apply(message: impl Into<String>) -> Self {
        FoldError::ApplyError {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        FoldError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }

    /// True if this error only reports cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FoldError::Cancelled(_))
    }
}

/// Result type alias for fold operations.
pub type FoldResult<T> = Result<T, FoldError>;
