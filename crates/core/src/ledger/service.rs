//! Authenticated ledger façade.
//!
//! `LedgerService` is the single entry point for transport collaborators.
//! It holds no state of its own and performs no validation beyond what the
//! registry does; cloning it is cheap and every clone shares one registry.

use std::sync::Arc;

use cardledger_shared::config::LedgerConfig;
use cardledger_shared::types::CardNumber;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::registry::AccountRegistry;
use super::types::{AccountSummary, CreateAccountInput};

/// Public operation set of the ledger.
#[derive(Debug, Clone)]
pub struct LedgerService {
    registry: Arc<AccountRegistry>,
}

impl LedgerService {
    /// Wraps an existing registry.
    #[must_use]
    pub fn new(registry: AccountRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Builds a service over a fresh registry.
    #[must_use]
    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(AccountRegistry::new(config))
    }

    /// Opens a card account with `balance = credit_limit`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` naming `holder`, `pin`, or `credit_limit`;
    /// `IdSpaceExhausted` if no unique card number could be drawn.
    pub fn create_account(
        &self,
        holder: &str,
        pin: u32,
        credit_limit: Decimal,
    ) -> Result<CardNumber, LedgerError> {
        self.registry.create_account(holder, pin, credit_limit)
    }

    /// [`Self::create_account`] from a decoded request.
    pub fn create_account_from(
        &self,
        input: &CreateAccountInput,
    ) -> Result<CardNumber, LedgerError> {
        self.create_account(&input.holder, input.pin, input.credit_limit)
    }

    /// Succeeds iff the card number and PIN are valid. Used as a login check.
    pub fn verify_credentials(&self, id: &str, pin: u32) -> Result<(), LedgerError> {
        self.registry.authenticate(id, pin).map(|_| ())
    }

    /// Available balance.
    pub fn get_balance(&self, id: &str, pin: u32) -> Result<Decimal, LedgerError> {
        self.registry.balance(id, pin)
    }

    /// Spends `amount` on the card and returns the new balance.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed`, `InvalidArgument` for a non-positive amount,
    /// or `InsufficientFunds`.
    pub fn purchase(&self, id: &str, pin: u32, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.registry.debit(id, pin, amount)
    }

    /// Restores `amount` of available balance and returns the new balance.
    ///
    /// # Errors
    ///
    /// `AuthenticationFailed`, `InvalidArgument` for a non-positive amount,
    /// or `CreditLimitExceeded`.
    pub fn recharge(&self, id: &str, pin: u32, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.registry.credit(id, pin, amount)
    }

    /// Purchase amounts in the order they succeeded.
    pub fn get_history(&self, id: &str, pin: u32) -> Result<Vec<Decimal>, LedgerError> {
        self.registry.history(id, pin)
    }

    /// Holder, number, limit, and balance.
    pub fn describe(&self, id: &str, pin: u32) -> Result<AccountSummary, LedgerError> {
        self.registry.describe(id, pin)
    }

    /// Number of accounts opened so far.
    pub fn account_count(&self) -> usize {
        self.registry.len()
    }
}
