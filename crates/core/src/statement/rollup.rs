//! Per-account, per-year item summation.

use rebook_shared::types::{AccountName, Money};
use serde::Serialize;

use super::error::StatementError;
use crate::ledger::{Books, FiscalYear};

/// The net sum of one account's items over one fiscal year.
///
/// Debit items count negative, credit items positive. Item and
/// transaction counts are carried along for audit logging.
#[derive(Debug, Clone, Serialize)]
pub struct Rollup {
    account: AccountName,
    balance: Money,
    item_count: usize,
    transaction_count: usize,
}

impl Rollup {
    /// Sums the account's items over the year's transactions, using the
    /// year's per-account index.
    ///
    /// An account with no postings rolls up to zero; being unlinked is not
    /// an error at this level.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::MissingTransaction`] if the year's index
    /// references a transaction the books no longer hold.
    pub fn compute(
        books: &Books,
        year: &FiscalYear,
        account: &AccountName,
    ) -> Result<Self, StatementError> {
        let mut balance = Money::ZERO;
        let mut item_count = 0;
        let mut transaction_count = 0;

        for id in year.transactions_for(account) {
            let transaction = books
                .transaction(id)
                .ok_or(StatementError::MissingTransaction(id))?;
            let before = item_count;
            for item in transaction.items() {
                if item.account() == account {
                    balance += item.signed_amount();
                    item_count += 1;
                }
            }
            if item_count > before {
                transaction_count += 1;
            }
        }

        Ok(Self {
            account: account.clone(),
            balance,
            item_count,
            transaction_count,
        })
    }

    /// The rolled-up account.
    #[must_use]
    pub fn account(&self) -> &AccountName {
        &self.account
    }

    /// Net balance: debit negative, credit positive.
    #[must_use]
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Number of items summed.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of distinct transactions contributing items.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}
