//! Ledger input and snapshot types.
//!
//! These are what a transport collaborator decodes requests into and encodes
//! responses from. They never reference live account state.

use cardledger_shared::types::CardNumber;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input for opening a new card account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountInput {
    /// Display name of the card holder.
    pub holder: String,
    /// Raw 4-digit PIN.
    pub pin: u32,
    /// Credit limit; also the opening balance.
    pub credit_limit: Decimal,
}

/// Read-only snapshot of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Card number.
    pub number: CardNumber,
    /// Card holder name.
    pub holder: String,
    /// Credit limit.
    pub credit_limit: Decimal,
    /// Available balance at the time of the snapshot.
    pub balance: Decimal,
}

impl std::fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Card{{holder='{}', number='{}', limit={}, available={}}}",
            self.holder, self.number, self.credit_limit, self.balance
        )
    }
}
