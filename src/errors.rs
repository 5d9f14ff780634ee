//! Error types for the calculation engine.
//!
//! The engine distinguishes exactly two failure kinds:
//! - **`ERR_INPUT`**: deterministic validation failures (missing pole height,
//!   missing power height on an existing non-communication pole)
//! - **`ERR_THROW`**: anything unexpected, reported generically
//!
//! Clearance violations are never errors. They travel as warnings in
//! [`crate::findings::Findings`] so the caller still receives the numbers.
//!
//! # Example
//!
//! ```rust
//! use polecalc::errors::{CalcError, ErrorKind};
//!
//! let err = CalcError::input("poleHeight", "Pole height is required");
//! assert_eq!(err.kind(), ErrorKind::Input);
//! assert_eq!(err.code().as_str(), "E001");
//! assert_eq!(err.field(), "poleHeight");
//! ```

use serde::Serialize;
use thiserror::Error;

/// Key used in the outcome's `errors` map for unexpected faults.
pub const GENERIC_ERROR_KEY: &str = "calculation";

/// Structured error code for programmatic handling.
///
/// - E001-E009: input validation
/// - E010-E019: numeric faults
/// - E090-E099: unexpected faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Input error - a required field is missing or unreadable
    pub const INPUT_MISSING: ErrorCode = ErrorCode("E001");
    /// Numeric fault - a non-finite value reached the result
    pub const NON_FINITE: ErrorCode = ErrorCode("E010");
    /// Unexpected fault - panic or internal invariant
    pub const UNEXPECTED: ErrorCode = ErrorCode("E090");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two externally visible failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "ERR_INPUT")]
    Input,
    #[serde(rename = "ERR_THROW")]
    Throw,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Input => "ERR_INPUT",
            ErrorKind::Throw => "ERR_THROW",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Validation failure tied to one input field
    #[error("{message}")]
    Input {
        field: &'static str,
        message: String,
    },

    /// A computed quantity came out NaN or infinite
    #[error("Calculation produced a non-finite {quantity}")]
    NonFinite { quantity: &'static str },

    /// Catch-all for faults caught at the public boundary
    #[error("Unexpected calculation fault: {0}")]
    Unexpected(String),
}

impl CalcError {
    /// Create an input validation error for `field`.
    pub fn input(field: &'static str, message: impl Into<String>) -> Self {
        Self::Input {
            field,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input { .. } => ErrorKind::Input,
            Self::NonFinite { .. } | Self::Unexpected(_) => ErrorKind::Throw,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Input { .. } => ErrorCode::INPUT_MISSING,
            Self::NonFinite { .. } => ErrorCode::NON_FINITE,
            Self::Unexpected(_) => ErrorCode::UNEXPECTED,
        }
    }

    /// Key this error is reported under in the outcome's `errors` map.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Input { field, .. } => *field,
            Self::NonFinite { .. } | Self::Unexpected(_) => GENERIC_ERROR_KEY,
        }
    }

    /// Message shown to callers. Unexpected faults stay generic.
    pub fn public_message(&self) -> String {
        match self {
            Self::Input { message, .. } => message.clone(),
            Self::NonFinite { .. } | Self::Unexpected(_) => {
                "Calculation failed. Check the inputs and try again.".to_string()
            }
        }
    }
}

/// Result type alias using the engine error type
pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject NaN and infinity before a value leaves the engine.
pub fn ensure_finite(value: f64, quantity: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite { quantity })
    }
}
