//! Concurrency-safe account registry.
//!
//! The registry is the only owner of accounts and the only writer of
//! balances and histories. Each account sits behind its own mutex, so
//! operations on different accounts run in parallel while operations on the
//! same account are serialized. Every read-modify-write happens inside a
//! single lock scope; the guard is released on every exit path.

use std::sync::Arc;

use cardledger_shared::config::LedgerConfig;
use cardledger_shared::types::CardNumber;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::account::Account;
use super::error::LedgerError;
use super::numbers::{CardNumberSource, RandomCardNumbers};
use super::types::AccountSummary;
use super::validation::{validate_credit_limit, validate_holder, validate_pin};

type SharedAccount = Arc<Mutex<Account>>;

/// Read-only handle to an authenticated account.
///
/// The handle cannot mutate the account; it only yields snapshots.
#[derive(Debug, Clone)]
pub struct AccountHandle {
    account: SharedAccount,
}

impl AccountHandle {
    /// Card number of the account.
    pub fn number(&self) -> CardNumber {
        self.account.lock().number().clone()
    }

    /// Current snapshot of the account.
    pub fn summary(&self) -> AccountSummary {
        self.account.lock().summary()
    }
}

/// Authoritative store of all accounts.
pub struct AccountRegistry {
    accounts: DashMap<CardNumber, SharedAccount>,
    numbers: Mutex<Box<dyn CardNumberSource>>,
    max_id_attempts: u32,
}

impl AccountRegistry {
    /// Creates an empty registry drawing random card numbers.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        Self::with_number_source(RandomCardNumbers::new(), config.max_id_attempts)
    }

    /// Creates an empty registry with a custom number source.
    ///
    /// `max_id_attempts` bounds the uniqueness retry loop; 0 is treated as 1.
    pub fn with_number_source(
        source: impl CardNumberSource + 'static,
        max_id_attempts: u32,
    ) -> Self {
        let source: Box<dyn CardNumberSource> = Box::new(source);
        Self {
            accounts: DashMap::new(),
            numbers: Mutex::new(source),
            max_id_attempts: max_id_attempts.max(1),
        }
    }

    /// Number of accounts created so far.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no account has been created.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Opens a new account and returns its card number.
    ///
    /// The account is visible to lookups before this returns.
    pub fn create_account(
        &self,
        holder: &str,
        pin: u32,
        credit_limit: Decimal,
    ) -> Result<CardNumber, LedgerError> {
        let holder = validate_holder(holder)?;
        let pin = validate_pin(pin)?;
        let credit_limit = validate_credit_limit(credit_limit)?;

        for attempt in 1..=self.max_id_attempts {
            // Scoped so the generator lock is never held across the map entry.
            let candidate = self.numbers.lock().next_number();

            match self.accounts.entry(candidate) {
                Entry::Occupied(taken) => {
                    warn!(card = %taken.key().masked(), attempt, "card number collision, drawing again");
                }
                Entry::Vacant(slot) => {
                    let number = slot.key().clone();
                    let account = Account::open(number.clone(), holder, pin, credit_limit)?;
                    slot.insert(Arc::new(Mutex::new(account)));

                    info!(card = %number.masked(), %credit_limit, "account created");
                    return Ok(number);
                }
            }
        }

        error!(
            attempts = self.max_id_attempts,
            "no unique card number found"
        );
        Err(LedgerError::IdSpaceExhausted {
            attempts: self.max_id_attempts,
        })
    }

    /// Checks credentials and returns a read-only handle.
    ///
    /// Unknown card numbers, malformed card numbers, and wrong PINs all fail
    /// with the same `AuthenticationFailed`.
    pub fn authenticate(&self, id: &str, pin: u32) -> Result<AccountHandle, LedgerError> {
        let account = self.lookup(id).ok_or_else(|| Self::reject(id))?;
        if !account.lock().verify_pin(pin) {
            return Err(Self::reject(id));
        }
        Ok(AccountHandle { account })
    }

    /// Spends `amount` and returns the new balance.
    pub fn debit(&self, id: &str, pin: u32, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.with_account(id, pin, |account| {
            let balance = account.debit(amount)?;
            debug!(card = %account.number().masked(), %amount, %balance, "purchase recorded");
            Ok(balance)
        })
    }

    /// Adds `amount` to the balance and returns the new balance.
    pub fn credit(&self, id: &str, pin: u32, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.with_account(id, pin, |account| {
            let balance = account.credit(amount)?;
            debug!(card = %account.number().masked(), %amount, %balance, "recharge applied");
            Ok(balance)
        })
    }

    /// Current available balance.
    pub fn balance(&self, id: &str, pin: u32) -> Result<Decimal, LedgerError> {
        self.with_account(id, pin, |account| Ok(account.balance()))
    }

    /// Copy of the purchase history, oldest first.
    pub fn history(&self, id: &str, pin: u32) -> Result<Vec<Decimal>, LedgerError> {
        self.with_account(id, pin, |account| Ok(account.history().to_vec()))
    }

    /// Snapshot of holder, number, limit, and balance.
    pub fn describe(&self, id: &str, pin: u32) -> Result<AccountSummary, LedgerError> {
        self.with_account(id, pin, |account| Ok(account.summary()))
    }

    fn lookup(&self, id: &str) -> Option<SharedAccount> {
        let number: CardNumber = id.parse().ok()?;
        // Clone the Arc out so the shard lock is released before the account
        // lock is taken.
        self.accounts
            .get(&number)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn with_account<T>(
        &self,
        id: &str,
        pin: u32,
        op: impl FnOnce(&mut Account) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let shared = self.lookup(id).ok_or_else(|| Self::reject(id))?;
        let mut account = shared.lock();
        if !account.verify_pin(pin) {
            return Err(Self::reject(id));
        }
        op(&mut account)
    }

    fn reject(id: &str) -> LedgerError {
        match id.parse::<CardNumber>() {
            Ok(number) => warn!(card = %number.masked(), "authentication failed"),
            Err(_) => warn!("authentication failed for malformed card number"),
        }
        LedgerError::AuthenticationFailed
    }
}

impl std::fmt::Debug for AccountRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRegistry")
            .field("accounts", &self.accounts.len())
            .field("max_id_attempts", &self.max_id_attempts)
            .finish_non_exhaustive()
    }
}
