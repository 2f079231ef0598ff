//! Fault taxonomy exposed to callers outside the ledger core.
//!
//! Transport collaborators (remote invocation layers, console clients) map
//! these faults onto their own response encoding.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Caller-facing fault kinds.
#[derive(Debug, Error)]
pub enum AppError {
    /// Credentials were rejected.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A well-formed request broke a business rule.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP-style status code for this fault.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller can fix the request and try again.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
