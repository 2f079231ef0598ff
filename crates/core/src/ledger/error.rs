//! Ledger error types.
//!
//! Every failure the ledger can report to a caller is one of four
//! recoverable kinds, plus one internal kind for identifier exhaustion.

use cardledger_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A field failed validation.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    // ========== Credential Errors ==========
    /// Unknown card number or wrong PIN. The two are deliberately merged.
    #[error("Card not found or incorrect PIN")]
    AuthenticationFailed,

    // ========== Business Rule Errors ==========
    /// Purchase exceeds the available balance.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount the caller tried to spend.
        requested: Decimal,
        /// Balance at the time of the attempt.
        available: Decimal,
    },

    /// Recharge would push the balance above the credit limit.
    #[error("Credit limit exceeded: {balance} + {requested} > {limit}")]
    CreditLimitExceeded {
        /// Amount the caller tried to add.
        requested: Decimal,
        /// Balance at the time of the attempt.
        balance: Decimal,
        /// The account's credit limit.
        limit: Decimal,
    },

    // ========== Internal Errors ==========
    /// No free card number was found within the configured attempts.
    #[error("Could not allocate a unique card number after {attempts} attempts")]
    IdSpaceExhausted {
        /// Number of candidates drawn.
        attempts: u32,
    },
}

impl LedgerError {
    /// Shorthand for [`LedgerError::InvalidArgument`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the error code for responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::CreditLimitExceeded { .. } => "CREDIT_LIMIT_EXCEEDED",
            Self::IdSpaceExhausted { .. } => "ID_SPACE_EXHAUSTED",
        }
    }

    /// Returns true for failures the caller cannot fix by changing the request.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::IdSpaceExhausted { .. })
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidArgument { .. } => Self::Validation(message),
            LedgerError::AuthenticationFailed => Self::Unauthorized(message),
            LedgerError::InsufficientFunds { .. } | LedgerError::CreditLimitExceeded { .. } => {
                Self::BusinessRule(message)
            }
            LedgerError::IdSpaceExhausted { .. } => Self::Internal(message),
        }
    }
}
