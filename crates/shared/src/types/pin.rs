//! Four-digit PIN credential.
//!
//! PINs are compared by exact equality. They are never printed: `Debug`
//! redacts the digits and there is no `Display` impl.

use thiserror::Error;

/// Error returned when a PIN is outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("PIN must be a 4-digit number between {min} and {max}", min = Pin::MIN, max = Pin::MAX)]
pub struct PinError;

/// A 4-digit numeric PIN in `1000..=9999`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Pin(u16);

impl Pin {
    /// Smallest accepted PIN.
    pub const MIN: u32 = 1000;
    /// Largest accepted PIN.
    pub const MAX: u32 = 9999;

    /// Validates and wraps a raw PIN.
    pub fn new(raw: u32) -> Result<Self, PinError> {
        if !(Self::MIN..=Self::MAX).contains(&raw) {
            return Err(PinError);
        }
        u16::try_from(raw).map(Self).map_err(|_| PinError)
    }

    /// Returns true if `raw` is exactly this PIN.
    #[must_use]
    pub fn matches(self, raw: u32) -> bool {
        u32::from(self.0) == raw
    }
}

impl std::fmt::Debug for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl TryFrom<u32> for Pin {
    type Error = PinError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
#[path = "pin_tests.rs"]
mod tests;
