//! Account reference data: categories, polarity, groups, and year links.

use std::cmp::Ordering;

use rebook_shared::types::{AccountName, GroupName};
use serde::{Deserialize, Serialize};

/// Account category, in statement presentation order.
///
/// The derived ordering (Asset < Liability < Equity < Income < Expense) is
/// part of the statement sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    /// Asset accounts (cash, receivables, inventory).
    Asset,
    /// Liability accounts (payables, loans).
    Liability,
    /// Equity accounts (capital, distributions).
    Equity,
    /// Income accounts (sales, interest earned).
    Income,
    /// Expense accounts (purchases, wages).
    Expense,
}

impl AccountCategory {
    /// Returns true for categories reported on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns true for categories reported on the income statement.
    #[must_use]
    pub const fn is_income_statement(self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }
}

/// Side of a double-entry posting.
///
/// The signed-sum convention everywhere in this crate is debit negative,
/// credit positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// A ledger account.
///
/// The name is the account's primary key, globally unique and immutable
/// once registered in the books. Accounts carry no mutable state; balances
/// are always recomputed from posted items.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account name.
    pub name: AccountName,
    /// Human-readable description from the legacy chart of accounts.
    pub description: String,
    /// Default posting side for this account.
    pub side: Side,
    /// Whether debit items against this account are receivables.
    pub receivable: bool,
    /// Account category.
    pub category: AccountCategory,
}

/// An account group.
///
/// Purely descriptive; accounts point at their group through the year link,
/// never the other way around.
#[derive(Debug, Clone, Serialize)]
pub struct AccountGroup {
    /// Unique group name within the classification scheme.
    pub name: GroupName,
}

/// Link record tying an account into one fiscal year.
///
/// Records the account's category, group, and presentation order for that
/// year. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiscalYearAccount {
    /// The fiscal year this link belongs to.
    pub year: i32,
    /// The linked account.
    pub account: AccountName,
    /// Category of the account within this year.
    pub category: AccountCategory,
    /// Group the account is presented under within this year.
    pub group: GroupName,
    /// Order of the group within its category.
    pub group_order: u32,
    /// Order of the account within its group.
    pub account_order: u32,
}

impl Ord for FiscalYearAccount {
    /// Statement presentation order: year, category, group order, account
    /// order, then the name keys to keep the order total.
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.category.cmp(&other.category))
            .then_with(|| self.group_order.cmp(&other.group_order))
            .then_with(|| self.account_order.cmp(&other.account_order))
            .then_with(|| self.account.cmp(&other.account))
            .then_with(|| self.group.cmp(&other.group))
    }
}

impl PartialOrd for FiscalYearAccount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
