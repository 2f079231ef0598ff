//! Card account entity.
//!
//! An account owns its balance and purchase history. Invariant at every
//! observable point: `0 <= balance <= credit_limit`.

use cardledger_shared::types::{CardNumber, Pin};
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::AccountSummary;
use super::validation::{validate_amount, validate_credit_limit, validate_holder};

/// A credit card account.
#[derive(Debug)]
pub struct Account {
    number: CardNumber,
    holder: String,
    pin: Pin,
    credit_limit: Decimal,
    balance: Decimal,
    history: Vec<Decimal>,
}

impl Account {
    /// Opens an account with `balance = credit_limit` and an empty history.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank holder or a non-positive limit.
    pub fn open(
        number: CardNumber,
        holder: &str,
        pin: Pin,
        credit_limit: Decimal,
    ) -> Result<Self, LedgerError> {
        let holder = validate_holder(holder)?.to_string();
        let credit_limit = validate_credit_limit(credit_limit)?;

        Ok(Self {
            number,
            holder,
            pin,
            credit_limit,
            balance: credit_limit,
            history: Vec::new(),
        })
    }

    /// Card number.
    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    /// Holder name.
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Credit limit.
    pub fn credit_limit(&self) -> Decimal {
        self.credit_limit
    }

    /// Available balance.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Successful purchase amounts, oldest first.
    pub fn history(&self) -> &[Decimal] {
        &self.history
    }

    /// Returns true if `raw` is this account's PIN.
    pub fn verify_pin(&self, raw: u32) -> bool {
        self.pin.matches(raw)
    }

    /// Spends `amount` and records it in the history.
    ///
    /// Returns the new balance.
    pub fn debit(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        let amount = validate_amount(amount)?;
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        let Some(remaining) = self
            .balance
            .checked_sub(amount)
            .filter(|remaining| remaining.scale() >= exact_scale(self.balance, amount))
        else {
            return Err(too_precise());
        };

        self.balance = remaining;
        self.history.push(amount);
        self.assert_invariants();
        Ok(self.balance)
    }

    /// Adds `amount` back to the balance. Recharges are not recorded in the
    /// history.
    ///
    /// Returns the new balance.
    pub fn credit(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        let amount = validate_amount(amount)?;
        // overflow means the sum is past any representable limit
        let refilled = match self.balance.checked_add(amount) {
            Some(sum) if sum <= self.credit_limit => sum,
            _ => {
                return Err(LedgerError::CreditLimitExceeded {
                    requested: amount,
                    balance: self.balance,
                    limit: self.credit_limit,
                });
            }
        };
        if refilled.scale() < exact_scale(self.balance, amount) {
            return Err(too_precise());
        }

        self.balance = refilled;
        self.assert_invariants();
        Ok(self.balance)
    }

    /// Returns a detached snapshot of the account.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            number: self.number.clone(),
            holder: self.holder.clone(),
            credit_limit: self.credit_limit,
            balance: self.balance,
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
        debug_assert!(
            self.balance <= self.credit_limit,
            "Invariant violated: balance {} above limit {}",
            self.balance,
            self.credit_limit
        );
    }
}

/// Scale a result of `lhs ± rhs` must keep to be exact.
///
/// `Decimal` rounds instead of failing when a sum needs more than 28
/// significant digits, and the rounded result comes back at a lower scale.
/// Trailing zeros are ignored, so `0.00 + 5` still counts as exact.
fn exact_scale(lhs: Decimal, rhs: Decimal) -> u32 {
    lhs.normalize().scale().max(rhs.normalize().scale())
}

fn too_precise() -> LedgerError {
    LedgerError::invalid("amount", "has more decimal places than the balance can hold")
}
