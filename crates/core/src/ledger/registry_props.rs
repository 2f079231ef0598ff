//! Property-based tests for AccountRegistry.
//!
//! - Balance stays within `[0, credit_limit]` after every step
//! - Purchases succeed exactly when the amount is positive and covered
//! - Recharges succeed exactly when the amount is positive and fits the limit
//! - Wrong PINs never change state
//! - Card numbers are 16 digits and unique
//! - Amounts across the whole `Decimal` range apply exactly or fail typed

use std::collections::HashSet;

use cardledger_shared::config::LedgerConfig;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::registry::AccountRegistry;

const PIN: u32 = 2468;

#[derive(Debug, Clone)]
enum Op {
    Purchase(Decimal),
    Recharge(Decimal),
    WrongPinPurchase(Decimal),
}

/// Amounts from -50.00 to 500.00, zero and negatives included on purpose.
fn amount() -> impl Strategy<Value = Decimal> {
    (-5_000i64..50_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate strictly positive credit limits (0.01 to 1,000.00).
fn credit_limit() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Non-negative decimals over the full 96-bit mantissa and every scale,
/// plus the edges of the type.
fn wide_decimal() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::MAX),
        1 => Just(Decimal::new(1, 28)),
        1 => (1i64..1_000).prop_map(|units| Decimal::MAX - Decimal::new(units, 0)),
        6 => (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale)),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => amount().prop_map(Op::Purchase),
        3 => amount().prop_map(Op::Recharge),
        1 => amount().prop_map(Op::WrongPinPurchase),
    ]
}

fn registry() -> AccountRegistry {
    AccountRegistry::new(&LedgerConfig::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Replays a random operation sequence against a model of the account.
    #[test]
    fn prop_operations_match_model(
        limit in credit_limit(),
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let registry = registry();
        let id = registry.create_account("Prop", PIN, limit).unwrap();
        let id = id.as_str();

        let mut balance = limit;
        let mut history: Vec<Decimal> = Vec::new();

        for op in ops {
            match op {
                Op::Purchase(amount) => {
                    let result = registry.debit(id, PIN, amount);
                    if amount > Decimal::ZERO && amount <= balance {
                        balance -= amount;
                        history.push(amount);
                        prop_assert_eq!(result, Ok(balance));
                    } else if amount <= Decimal::ZERO {
                        let is_invalid = matches!(result, Err(LedgerError::InvalidArgument { .. }));
                        prop_assert!(is_invalid);
                    } else {
                        let is_insufficient = matches!(result, Err(LedgerError::InsufficientFunds { .. }));
                        prop_assert!(is_insufficient);
                    }
                }
                Op::Recharge(amount) => {
                    let result = registry.credit(id, PIN, amount);
                    if amount > Decimal::ZERO && balance + amount <= limit {
                        balance += amount;
                        prop_assert_eq!(result, Ok(balance));
                    } else if amount <= Decimal::ZERO {
                        let is_invalid = matches!(result, Err(LedgerError::InvalidArgument { .. }));
                        prop_assert!(is_invalid);
                    } else {
                        let is_over = matches!(result, Err(LedgerError::CreditLimitExceeded { .. }));
                        prop_assert!(is_over);
                    }
                }
                Op::WrongPinPurchase(amount) => {
                    let result = registry.debit(id, PIN + 1, amount);
                    prop_assert_eq!(result, Err(LedgerError::AuthenticationFailed));
                }
            }

            let actual = registry.balance(id, PIN).unwrap();
            prop_assert!(actual >= Decimal::ZERO);
            prop_assert!(actual <= limit);
            prop_assert_eq!(actual, balance);
        }

        prop_assert_eq!(registry.history(id, PIN).unwrap(), history);
    }

    /// Every created card number is 16 digits and distinct from the others.
    #[test]
    fn prop_card_numbers_unique(count in 1usize..200) {
        let registry = registry();
        let mut seen = HashSet::new();

        for i in 0..count {
            let number = registry
                .create_account(&format!("Holder {i}"), 1000, Decimal::ONE)
                .unwrap();
            prop_assert_eq!(number.as_str().len(), 16);
            prop_assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
            prop_assert!(seen.insert(number));
        }

        prop_assert_eq!(registry.len(), count);
    }

    /// Any PIN other than the real one is rejected on every operation.
    #[test]
    fn prop_wrong_pin_rejected_everywhere(
        wrong in (1000u32..10_000).prop_filter("must differ", |p| *p != PIN),
        amount in amount(),
    ) {
        let registry = registry();
        let id = registry.create_account("Prop", PIN, Decimal::ONE_HUNDRED).unwrap();
        let id = id.as_str();
        registry.debit(id, PIN, Decimal::TEN).unwrap();

        prop_assert_eq!(registry.balance(id, wrong), Err(LedgerError::AuthenticationFailed));
        prop_assert_eq!(registry.history(id, wrong), Err(LedgerError::AuthenticationFailed));
        prop_assert_eq!(registry.describe(id, wrong), Err(LedgerError::AuthenticationFailed));
        prop_assert_eq!(registry.debit(id, wrong, amount), Err(LedgerError::AuthenticationFailed));
        prop_assert_eq!(registry.credit(id, wrong, amount), Err(LedgerError::AuthenticationFailed));
        prop_assert!(registry.authenticate(id, wrong).is_err());

        prop_assert_eq!(registry.balance(id, PIN).unwrap(), Decimal::new(90, 0));
        prop_assert_eq!(registry.history(id, PIN).unwrap(), vec![Decimal::TEN]);
    }

    /// Near `Decimal::MAX` or at 28 decimal places, an operation either
    /// moves the balance by exactly the amount or fails with a typed error
    /// and leaves the account alone.
    #[test]
    fn prop_extreme_amounts_exact_or_rejected(
        limit in wide_decimal().prop_filter("positive", |d| !d.is_zero()),
        ops in prop::collection::vec((any::<bool>(), wide_decimal()), 1..40),
    ) {
        let registry = registry();
        let id = registry.create_account("Prop", PIN, limit).unwrap();
        let id = id.as_str();

        for (purchase, amount) in ops {
            let before = registry.balance(id, PIN).unwrap();
            let history_before = registry.history(id, PIN).unwrap();

            let result = if purchase {
                registry.debit(id, PIN, amount)
            } else {
                registry.credit(id, PIN, amount)
            };
            let after = registry.balance(id, PIN).unwrap();
            let history_after = registry.history(id, PIN).unwrap();

            match result {
                Ok(balance) => {
                    prop_assert_eq!(balance, after);
                    if purchase {
                        prop_assert_eq!(after.checked_add(amount), Some(before));
                        prop_assert_eq!(history_after.len(), history_before.len() + 1);
                        prop_assert_eq!(history_after.last(), Some(&amount));
                    } else {
                        prop_assert_eq!(after.checked_sub(amount), Some(before));
                        prop_assert_eq!(&history_after, &history_before);
                    }
                }
                Err(err) => {
                    let typed = matches!(
                        err,
                        LedgerError::InsufficientFunds { .. }
                            | LedgerError::CreditLimitExceeded { .. }
                            | LedgerError::InvalidArgument { field: "amount", .. }
                    );
                    prop_assert!(typed, "unexpected error: {:?}", err);
                    prop_assert_eq!(after, before);
                    prop_assert_eq!(&history_after, &history_before);
                }
            }

            prop_assert!(after >= Decimal::ZERO);
            prop_assert!(after <= limit);
        }
    }
}
