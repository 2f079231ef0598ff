//! Card numbers: the 16-digit identifiers handed out for every account.
//!
//! Leading zeros are significant, so the number is kept as text rather than
//! an integer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a card number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardNumberError {
    /// The input does not have exactly 16 characters.
    #[error("card number must have exactly 16 digits, got {0}")]
    WrongLength(usize),

    /// The input contains something other than ASCII digits.
    #[error("card number must contain only digits")]
    NonDigit,
}

/// A 16-digit numeric card number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardNumber(String);

impl CardNumber {
    /// Number of digits in a card number.
    pub const LEN: usize = 16;

    /// Size of the identifier space (10^16).
    pub const SPACE: u64 = 10_000_000_000_000_000;

    /// Renders `value mod 10^16` as a zero-padded card number.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(format!("{:016}", value % Self::SPACE))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number with everything but the last four digits hidden.
    ///
    /// This is the only form that should reach logs.
    #[must_use]
    pub fn masked(&self) -> String {
        let visible = &self.0[Self::LEN - 4..];
        format!("{}{visible}", "*".repeat(Self::LEN - 4))
    }
}

impl std::fmt::Display for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CardNumber {
    type Err = CardNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Length is checked in chars so multi-byte input reports a sane count.
        let len = s.chars().count();
        if len != Self::LEN {
            return Err(CardNumberError::WrongLength(len));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardNumberError::NonDigit);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for CardNumber {
    type Error = CardNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardNumber> for String {
    fn from(value: CardNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
#[path = "card_number_tests.rs"]
mod tests;
