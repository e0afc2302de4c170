//! Fiscal years: date windows, account links, and the per-account index.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rebook_shared::types::{AccountName, GroupName, TransactionId};
use serde::Serialize;

use super::account::FiscalYearAccount;
use super::error::LedgerError;

/// An annual accounting period.
///
/// Owns the account links establishing which accounts are active in the
/// year, the ids of member transactions, and an incrementally-maintained
/// account-to-transactions index so rollups never scan the whole book.
///
/// The year does not police its own date window: the books route each
/// transaction to the covering year before membership is recorded.
#[derive(Debug, Clone, Serialize)]
pub struct FiscalYear {
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
    links: BTreeMap<AccountName, FiscalYearAccount>,
    transactions: BTreeSet<TransactionId>,
    by_account: BTreeMap<AccountName, BTreeSet<TransactionId>>,
}

impl FiscalYear {
    /// Creates a fiscal year with an explicit date window.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidYearWindow`] if the window ends before
    /// it starts.
    pub fn new(year: i32, start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if end < start {
            return Err(LedgerError::InvalidYearWindow { start, end });
        }
        Ok(Self {
            year,
            start,
            end,
            links: BTreeMap::new(),
            transactions: BTreeSet::new(),
            by_account: BTreeMap::new(),
        })
    }

    /// Creates a calendar fiscal year (January 1 through December 31).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::YearOutOfRange`] for years the calendar cannot
    /// express.
    pub fn calendar(year: i32) -> Result<Self, LedgerError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(LedgerError::YearOutOfRange(year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(LedgerError::YearOutOfRange(year))?;
        Self::new(year, start, end)
    }

    /// The year number.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// First day of the window.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if the date falls inside the window (inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true if the two year windows share any date.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The link for an account, if the account is active this year.
    #[must_use]
    pub fn link(&self, account: &AccountName) -> Option<&FiscalYearAccount> {
        self.links.get(account)
    }

    /// The group an account is classified under in this year.
    ///
    /// Looks up the link for this specific year; an account grouped
    /// differently in another year is unaffected.
    #[must_use]
    pub fn group_of(&self, account: &AccountName) -> Option<&GroupName> {
        self.links.get(account).map(|link| &link.group)
    }

    /// All account links sorted by the statement presentation order
    /// (category, group order, account order).
    #[must_use]
    pub fn accounts_in_statement_order(&self) -> Vec<&FiscalYearAccount> {
        let mut links: Vec<&FiscalYearAccount> = self.links.values().collect();
        links.sort();
        links
    }

    /// Ids of all transactions dated in this year, ascending.
    pub fn transaction_ids(&self) -> impl Iterator<Item = TransactionId> + '_ {
        self.transactions.iter().copied()
    }

    /// Number of transactions recorded in this year.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Ids of the transactions touching one account, ascending.
    pub fn transactions_for(&self, account: &AccountName) -> impl Iterator<Item = TransactionId> + '_ {
        self.by_account.get(account).into_iter().flatten().copied()
    }

    /// Records an account link. The books validate before calling.
    pub(crate) fn insert_link(&mut self, link: FiscalYearAccount) {
        self.links.insert(link.account.clone(), link);
    }

    /// Records a transaction's membership and indexes it per touched
    /// account. The books validate before calling.
    pub(crate) fn index_transaction(
        &mut self,
        id: TransactionId,
        touched: impl IntoIterator<Item = AccountName>,
    ) {
        self.transactions.insert(id);
        for account in touched {
            self.by_account.entry(account).or_default().insert(id);
        }
    }
}
