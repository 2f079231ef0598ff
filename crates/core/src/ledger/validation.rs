//! Field validation rules for ledger operations.

use cardledger_shared::types::Pin;
use rust_decimal::Decimal;

use super::error::LedgerError;

/// Validates a holder name and returns it trimmed.
pub fn validate_holder(holder: &str) -> Result<&str, LedgerError> {
    let trimmed = holder.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::invalid("holder", "must not be empty"));
    }
    Ok(trimmed)
}

/// Validates a raw PIN (1000..=9999).
pub fn validate_pin(raw: u32) -> Result<Pin, LedgerError> {
    Pin::new(raw).map_err(|e| LedgerError::invalid("pin", e.to_string()))
}

/// Validates a credit limit (strictly positive).
pub fn validate_credit_limit(limit: Decimal) -> Result<Decimal, LedgerError> {
    if limit <= Decimal::ZERO {
        return Err(LedgerError::invalid(
            "credit_limit",
            "must be greater than zero",
        ));
    }
    Ok(limit)
}

/// Validates a purchase or recharge amount (strictly positive).
pub fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid("amount", "must be greater than zero"));
    }
    Ok(amount)
}
