//! Balance sheet and income statement aggregation.

use rebook_shared::types::{AccountName, Money};
use serde::Serialize;

use super::error::StatementError;
use super::rollup::Rollup;
use crate::ledger::{AccountCategory, Books};

/// Which statement to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Asset, liability, and equity accounts.
    BalanceSheet,
    /// Income and expense accounts.
    IncomeStatement,
}

impl StatementKind {
    /// Returns true if accounts of this category appear on the statement.
    #[must_use]
    pub const fn includes(self, category: AccountCategory) -> bool {
        match self {
            Self::BalanceSheet => category.is_balance_sheet(),
            Self::IncomeStatement => category.is_income_statement(),
        }
    }
}

/// One statement for one fiscal year: a rollup per matching account, in
/// the year's presentation order, plus the summed balance.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    kind: StatementKind,
    year: i32,
    rollups: Vec<Rollup>,
}

impl Statement {
    /// Computes the statement from the books.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::YearNotFound`] for an unknown year, or
    /// the rollup's corruption guard.
    pub fn compute(books: &Books, year: i32, kind: StatementKind) -> Result<Self, StatementError> {
        let fiscal_year = books.year(year).ok_or(StatementError::YearNotFound(year))?;

        let mut rollups = Vec::new();
        for link in fiscal_year.accounts_in_statement_order() {
            if kind.includes(link.category) {
                rollups.push(Rollup::compute(books, fiscal_year, &link.account)?);
            }
        }

        Ok(Self { kind, year, rollups })
    }

    /// Which statement this is.
    #[must_use]
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The fiscal year the statement covers.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The rollups, in statement presentation order.
    #[must_use]
    pub fn rollups(&self) -> &[Rollup] {
        &self.rollups
    }

    /// The rollup for one account, if it appears on this statement.
    #[must_use]
    pub fn rollup_for(&self, account: &AccountName) -> Option<&Rollup> {
        self.rollups
            .iter()
            .find(|rollup| rollup.account() == account)
    }

    /// Sum of all rollup balances (debit negative, credit positive).
    #[must_use]
    pub fn balance(&self) -> Money {
        self.rollups.iter().map(Rollup::balance).sum()
    }
}
