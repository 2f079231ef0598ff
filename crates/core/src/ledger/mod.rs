//! Credit card account ledger.
//!
//! This module implements the core ledger functionality:
//! - Account entity with balance and purchase history
//! - Field validation rules
//! - Card number generation
//! - Concurrency-safe account registry
//! - Authenticated service façade
//! - Input and summary types
//! - Error types for ledger operations

pub mod account;
pub mod error;
pub mod numbers;
pub mod registry;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod registry_props;

pub use account::Account;
pub use error::LedgerError;
pub use numbers::{CardNumberSource, RandomCardNumbers};
pub use registry::{AccountHandle, AccountRegistry};
pub use service::LedgerService;
pub use types::{AccountSummary, CreateAccountInput};
