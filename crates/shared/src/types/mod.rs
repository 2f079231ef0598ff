//! Common types used across the application.

pub mod card_number;
pub mod pin;

pub use card_number::{CardNumber, CardNumberError};
pub use pin::{Pin, PinError};
