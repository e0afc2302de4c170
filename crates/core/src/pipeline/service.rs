//! The migration driver.

use rayon::prelude::*;
use rebook_shared::config::MigrationConfig;
use tracing::info;

use super::error::PipelineError;
use super::types::{ClosingSummary, YearCheck};
use crate::closing::CapitalStructure;
use crate::ledger::Books;
use crate::statement::{Statement, StatementKind};

/// Drives year-end closing and verification over built books.
#[derive(Debug, Clone)]
pub struct MigrationService {
    structure: CapitalStructure,
    verify_after_close: bool,
}

impl MigrationService {
    /// Creates a service for the given capital structure. Verification
    /// after each closed year is on by default.
    #[must_use]
    pub fn new(structure: CapitalStructure) -> Self {
        Self {
            structure,
            verify_after_close: true,
        }
    }

    /// Builds the service from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns the capital-structure validation error (bad names,
    /// ownership fractions not summing to 1).
    pub fn from_config(config: &MigrationConfig) -> Result<Self, PipelineError> {
        let structure = CapitalStructure::from_config(&config.closing)?;
        Ok(Self {
            structure,
            verify_after_close: config.options.verify_after_close,
        })
    }

    /// The capital structure driving the closing entries.
    #[must_use]
    pub fn structure(&self) -> &CapitalStructure {
        &self.structure
    }

    /// Disables or re-enables per-year verification.
    #[must_use]
    pub fn with_verification(mut self, verify_after_close: bool) -> Self {
        self.verify_after_close = verify_after_close;
        self
    }

    /// Closes one fiscal year.
    ///
    /// Runs the generators in a fixed order and posts each result: the
    /// capital adjustment first (it restores the near-equal precondition
    /// the income split relies on), then the income-to-capital transfer,
    /// then the distribution sweeps. When verification is enabled the
    /// year's statements are recomputed afterwards and must net to zero.
    ///
    /// # Errors
    ///
    /// Any generator, posting, or verification failure aborts the year's
    /// closing; no partial recovery is attempted.
    pub fn close_year(&self, books: &mut Books, year: i32) -> Result<ClosingSummary, PipelineError> {
        let adjustment = self
            .structure
            .capital_adjustment_transaction(books, year)?
            .map(|transaction| {
                let id = transaction.id();
                books.post_transaction(transaction).map(|()| id)
            })
            .transpose()?;

        let income_to_capital = self
            .structure
            .income_to_capital_transaction(books, year)?
            .map(|transaction| {
                let id = transaction.id();
                books.post_transaction(transaction).map(|()| id)
            })
            .transpose()?;

        let mut distributions = Vec::new();
        for transaction in self.structure.distribution_transactions(books, year)? {
            let id = transaction.id();
            books.post_transaction(transaction)?;
            distributions.push(id);
        }

        let summary = ClosingSummary {
            year,
            adjustment,
            income_to_capital,
            distributions,
        };
        info!(
            year,
            posted = summary.posted_count(),
            adjusted = summary.adjustment.is_some(),
            "Closed fiscal year"
        );

        if self.verify_after_close {
            self.verify_year(books, year)?;
        }
        Ok(summary)
    }

    /// Recomputes both statements for one year and checks the zero-sum
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::YearOutOfBalance`] when the balance sheet
    /// and income statement do not net to exactly zero.
    pub fn verify_year(&self, books: &Books, year: i32) -> Result<YearCheck, PipelineError> {
        let balance_sheet = Statement::compute(books, year, StatementKind::BalanceSheet)?.balance();
        let income_statement =
            Statement::compute(books, year, StatementKind::IncomeStatement)?.balance();
        let check = YearCheck {
            year,
            balance_sheet,
            income_statement,
        };
        if !check.is_balanced() {
            return Err(PipelineError::YearOutOfBalance {
                year,
                residual: check.residual(),
            });
        }
        Ok(check)
    }

    /// Verifies every year in the books, in parallel.
    ///
    /// Verification is read-only, so independent years can be checked on
    /// worker threads; results come back in ascending year order and the
    /// first failing year (by year number) wins.
    ///
    /// # Errors
    ///
    /// Returns the lowest-year failure.
    pub fn verify_all(&self, books: &Books) -> Result<Vec<YearCheck>, PipelineError> {
        let years: Vec<i32> = books.years().map(crate::ledger::FiscalYear::year).collect();
        years
            .par_iter()
            .map(|&year| self.verify_year(books, year))
            .collect::<Vec<Result<YearCheck, PipelineError>>>()
            .into_iter()
            .collect()
    }

    /// Closes every year in ascending order, then verifies all of them.
    ///
    /// # Errors
    ///
    /// Fails fast on the first year that cannot be closed or verified.
    pub fn close_and_verify_all(
        &self,
        books: &mut Books,
    ) -> Result<Vec<ClosingSummary>, PipelineError> {
        let years: Vec<i32> = books.years().map(crate::ledger::FiscalYear::year).collect();
        let mut summaries = Vec::with_capacity(years.len());
        for year in years {
            summaries.push(self.close_year(books, year)?);
        }
        self.verify_all(books)?;
        info!(years = summaries.len(), "Closed and verified all fiscal years");
        Ok(summaries)
    }
}
