//! Card account ledger core for CardLedger.
//!
//! This crate contains the stateful account ledger with ZERO transport or
//! storage dependencies. Accounts live in memory for the lifetime of the
//! process.
//!
//! # Modules
//!
//! - `ledger` - Accounts, the concurrency-safe registry, and the
//!   authenticated `LedgerService` façade consumed by remote callers

pub mod ledger;

pub use ledger::{AccountSummary, LedgerError, LedgerService};
