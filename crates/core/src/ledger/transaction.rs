//! Transactions and their double-entry items.

use chrono::NaiveDate;
use rebook_shared::types::{AccountName, Money, TransactionId};
use serde::Serialize;

use super::account::Side;
use super::error::LedgerError;

/// A single debit or credit against one account within one transaction.
///
/// Amounts are non-negative; the side carries the direction. Items are
/// immutable after the transaction is posted into the books.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    account: AccountName,
    amount: Money,
    side: Side,
    checked: bool,
}

impl Item {
    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeAmount`] if the amount is negative.
    pub fn new(account: AccountName, amount: Money, side: Side) -> Result<Self, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        Ok(Self {
            account,
            amount,
            side,
            checked: false,
        })
    }

    /// The account this item posts against.
    #[must_use]
    pub fn account(&self) -> &AccountName {
        &self.account
    }

    /// The non-negative item amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Debit or credit.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Whether this item has been ticked off during legacy bookkeeping.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the legacy checked flag.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Returns the signed amount: debit negative, credit positive.
    #[must_use]
    pub fn signed_amount(&self) -> Money {
        match self.side {
            Side::Debit => -self.amount,
            Side::Credit => self.amount,
        }
    }
}

/// A dated, described set of double-entry items.
///
/// Two shapes exist:
/// - ordinary transactions: at least two items whose signed amounts net to
///   exactly zero;
/// - balance transactions (opening balances): exactly one item, exempt from
///   the zero-sum rule.
///
/// Items can only be appended while the transaction is being assembled;
/// there is no removal operation, and the books only ever hand out shared
/// references once the transaction is posted.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    id: TransactionId,
    description: String,
    date: NaiveDate,
    checked: bool,
    balance: bool,
    items: Vec<Item>,
}

impl Transaction {
    /// Creates an empty ordinary transaction.
    #[must_use]
    pub fn new(id: TransactionId, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            description: description.into(),
            date,
            checked: false,
            balance: false,
            items: Vec::new(),
        }
    }

    /// Creates an empty balance transaction (opening-balance marker).
    #[must_use]
    pub fn new_balance(id: TransactionId, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            balance: true,
            ..Self::new(id, description, date)
        }
    }

    /// The transaction id.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// The transaction description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The transaction date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whether this is a balance (opening-balance) transaction.
    #[must_use]
    pub fn is_balance(&self) -> bool {
        self.balance
    }

    /// The items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Appends an item.
    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Sets the legacy checked flag on the transaction itself.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Mutable access to an item while the transaction is being assembled.
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Signed sum of all items (debit negative, credit positive).
    #[must_use]
    pub fn signed_sum(&self) -> Money {
        self.items.iter().map(Item::signed_amount).sum()
    }

    /// Validates the double-entry shape of this transaction.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::BalanceItemCount`] for a balance transaction without
    ///   exactly one item;
    /// - [`LedgerError::TooFewItems`] for an ordinary transaction with fewer
    ///   than two items;
    /// - [`LedgerError::Unbalanced`] when the signed sum is not exactly zero.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.balance {
            if self.items.len() != 1 {
                return Err(LedgerError::BalanceItemCount);
            }
            return Ok(());
        }

        if self.items.len() < 2 {
            return Err(LedgerError::TooFewItems);
        }

        let sum = self.signed_sum();
        if !sum.is_zero() {
            return Err(LedgerError::Unbalanced { sum });
        }

        Ok(())
    }

    /// Returns true when [`validate`](Self::validate) passes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Returns true only if the transaction flag is set and every item is
    /// individually checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked && self.items.iter().all(Item::is_checked)
    }
}
