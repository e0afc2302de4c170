//! The closing transaction generators.
//!
//! Each generator reads the year's balances, builds a transaction, and
//! returns it without posting; the pipeline decides what to post. The
//! generators take `&mut Books` only to mint synthetic transaction ids.

use rebook_shared::types::{AccountName, Money};
use tracing::debug;

use super::error::ClosingError;
use super::types::CapitalStructure;
use crate::allocation::Distributor;
use crate::ledger::{Books, Item, Side, Transaction};
use crate::statement::{Rollup, Statement, StatementError, StatementKind};

impl CapitalStructure {
    /// Builds the transaction transferring the year's net result from the
    /// income-summary account to the capital accounts.
    ///
    /// The net income-statement balance (credit positive) is split across
    /// the capital accounts by the distributor, which requires their
    /// balance-sheet balances to be within one cent of each other; run
    /// [`capital_adjustment_transaction`](Self::capital_adjustment_transaction)
    /// first when legacy drift may exist. Net income debits the income
    /// summary and credits each capital account; a net loss reverses both
    /// sides. A year with zero net result needs no transfer and yields
    /// `None`.
    ///
    /// # Errors
    ///
    /// Propagates statement and allocation failures, and returns
    /// [`ClosingError::ClosingUnbalanced`] if the assembled transaction
    /// fails validation (a logic defect).
    pub fn income_to_capital_transaction(
        &self,
        books: &mut Books,
        year: i32,
    ) -> Result<Option<Transaction>, ClosingError> {
        let end = books
            .year(year)
            .ok_or(StatementError::YearNotFound(year))?
            .end();
        let net = Statement::compute(books, year, StatementKind::IncomeStatement)?.balance();
        if net.is_zero() {
            debug!(year, "No net result; skipping income-to-capital transfer");
            return Ok(None);
        }

        let mut distributor = Distributor::new(net);
        for (account, balance) in self.capital_balances(books, year)? {
            distributor.add_balance(account, balance)?;
        }
        distributor.distribute_amount()?;
        distributor.distribute_remainder()?;

        let (summary_side, capital_side) = if net.is_negative() {
            (Side::Credit, Side::Debit)
        } else {
            (Side::Debit, Side::Credit)
        };

        let id = books.allocate_synthetic_id();
        let mut transaction = Transaction::new(id, "Income summary to capital", end);
        transaction.push_item(Item::new(self.income_summary().clone(), net.abs(), summary_side)?);
        for (account, amount) in distributor.item_amounts() {
            if amount.is_zero() {
                continue;
            }
            transaction.push_item(Item::new(account.clone(), amount.abs(), capital_side)?);
        }

        check_balanced(&transaction, year)?;
        debug!(year, id = %id, net = %net, "Built income-to-capital transaction");
        Ok(Some(transaction))
    }

    /// Builds one transaction per entity sweeping its distribution
    /// account's balance into its capital account.
    ///
    /// A plain 1:1 transfer, so no distributor is involved. Entities
    /// without a distribution account and distribution accounts with a
    /// zero balance are skipped.
    ///
    /// # Errors
    ///
    /// Propagates statement failures, and returns
    /// [`ClosingError::ClosingUnbalanced`] if an assembled transaction
    /// fails validation.
    pub fn distribution_transactions(
        &self,
        books: &mut Books,
        year: i32,
    ) -> Result<Vec<Transaction>, ClosingError> {
        let fiscal_year = books.year(year).ok_or(StatementError::YearNotFound(year))?;
        let end = fiscal_year.end();

        let mut transfers = Vec::new();
        for entity in self.entities() {
            let Some(distribution) = entity.distribution_account() else {
                continue;
            };
            let balance = Rollup::compute(books, fiscal_year, distribution)?.balance();
            if balance.is_zero() {
                continue;
            }
            transfers.push((
                entity.name().clone(),
                distribution.clone(),
                entity.capital_account().clone(),
                balance,
            ));
        }

        let mut transactions = Vec::with_capacity(transfers.len());
        for (entity, distribution, capital, balance) in transfers {
            // Distributions normally carry a debit balance (contra-equity);
            // the sweep posts the opposite side to zero the account.
            let (distribution_side, capital_side) = if balance.is_negative() {
                (Side::Credit, Side::Debit)
            } else {
                (Side::Debit, Side::Credit)
            };
            let id = books.allocate_synthetic_id();
            let mut transaction =
                Transaction::new(id, format!("Distributions of {entity} to capital"), end);
            transaction.push_item(Item::new(distribution, balance.abs(), distribution_side)?);
            transaction.push_item(Item::new(capital, balance.abs(), capital_side)?);
            check_balanced(&transaction, year)?;
            debug!(year, id = %id, entity = %entity, amount = %balance.abs(),
                "Built distribution-to-capital transaction");
            transactions.push(transaction);
        }
        Ok(transactions)
    }

    /// Builds the drift-correction transaction equalizing the capital
    /// accounts without outside money.
    ///
    /// Legacy amounts converted from floating point can leave the capital
    /// accounts more than one cent apart, which the income-to-capital
    /// split would reject. Equalizing first restores that precondition.
    /// Returns `None` when the balances are already within one cent.
    ///
    /// # Errors
    ///
    /// Propagates statement and allocation failures, and returns
    /// [`ClosingError::ClosingUnbalanced`] if the assembled transaction
    /// fails validation.
    pub fn capital_adjustment_transaction(
        &self,
        books: &mut Books,
        year: i32,
    ) -> Result<Option<Transaction>, ClosingError> {
        let end = books
            .year(year)
            .ok_or(StatementError::YearNotFound(year))?
            .end();

        let mut distributor = Distributor::new(Money::ZERO);
        for (account, balance) in self.capital_balances(books, year)? {
            distributor.add_balance(account, balance)?;
        }
        if !distributor.equalize()? {
            return Ok(None);
        }

        let adjustments: Vec<(AccountName, Money)> = distributor
            .item_amounts()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(account, amount)| (account.clone(), amount))
            .collect();
        if adjustments.is_empty() {
            return Ok(None);
        }

        let id = books.allocate_synthetic_id();
        let mut transaction = Transaction::new(id, "Capital adjustment", end);
        for (account, amount) in adjustments {
            let side = if amount.is_negative() {
                Side::Debit
            } else {
                Side::Credit
            };
            transaction.push_item(Item::new(account, amount.abs(), side)?);
        }

        check_balanced(&transaction, year)?;
        debug!(year, id = %id, "Built capital-adjustment transaction");
        Ok(Some(transaction))
    }

    /// Balance-sheet balances of the capital accounts, in entity order.
    fn capital_balances(
        &self,
        books: &Books,
        year: i32,
    ) -> Result<Vec<(AccountName, Money)>, ClosingError> {
        let fiscal_year = books.year(year).ok_or(StatementError::YearNotFound(year))?;
        self.entities()
            .iter()
            .map(|entity| {
                let balance = Rollup::compute(books, fiscal_year, entity.capital_account())?;
                Ok((entity.capital_account().clone(), balance.balance()))
            })
            .collect()
    }

}

/// Defensive re-validation of a generated transaction; structurally it
/// should always pass, so a failure is a logic defect.
fn check_balanced(transaction: &Transaction, year: i32) -> Result<(), ClosingError> {
    if transaction.validate().is_err() {
        return Err(ClosingError::ClosingUnbalanced {
            year,
            sum: transaction.signed_sum(),
        });
    }
    Ok(())
}
