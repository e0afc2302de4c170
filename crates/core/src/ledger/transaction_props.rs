//! Property-based tests for transaction validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rebook_shared::types::{AccountName, Money, TransactionId};

use super::account::Side;
use super::error::LedgerError;
use super::transaction::{Item, Transaction};

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

/// (cents, side) pairs for item lists of 2 to 8 entries.
fn items_strategy() -> impl Strategy<Value = Vec<(i64, Side)>> {
    prop::collection::vec((0i64..10_000_000, side_strategy()), 2..=8)
}

fn build(items: &[(i64, Side)]) -> Transaction {
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mut tx = Transaction::new(TransactionId::new(1), "generated", date);
    for (index, (cents, side)) in items.iter().enumerate() {
        let account = AccountName::new(format!("Account {index}")).unwrap();
        tx.push_item(Item::new(account, Money::from_cents(*cents), *side).unwrap());
    }
    tx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A transaction whose signed items do not net to zero is never valid.
    #[test]
    fn prop_nonzero_sum_is_never_valid(items in items_strategy()) {
        let tx = build(&items);
        let sum = tx.signed_sum();
        if sum.is_zero() {
            prop_assert!(tx.is_valid());
        } else {
            prop_assert!(!tx.is_valid());
            prop_assert!(
                matches!(
                    tx.validate(),
                    Err(LedgerError::Unbalanced { sum: reported }) if reported == sum
                ),
                "validate() did not report Unbalanced with sum {sum:?}"
            );
        }
    }

    /// Mirroring every item with its opposite side always balances.
    #[test]
    fn prop_mirrored_items_balance(items in items_strategy()) {
        let mut mirrored = items.clone();
        mirrored.extend(items.iter().map(|(cents, side)| (*cents, side.opposite())));
        let tx = build(&mirrored);
        prop_assert_eq!(tx.signed_sum(), Money::ZERO);
        prop_assert!(tx.is_valid());
    }

    /// A balance transaction is valid with exactly one item, never more.
    #[test]
    fn prop_balance_transaction_item_count(
        cents in 0i64..10_000_000,
        side in side_strategy(),
        extra in 0usize..3,
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut tx = Transaction::new_balance(TransactionId::new(1), "Opening balance", date);
        tx.push_item(
            Item::new(AccountName::new("Cash").unwrap(), Money::from_cents(cents), side).unwrap(),
        );
        for _ in 0..extra {
            tx.push_item(
                Item::new(AccountName::new("Cash").unwrap(), Money::from_cents(1), side).unwrap(),
            );
        }
        prop_assert_eq!(tx.is_valid(), extra == 0);
    }
}
