//! Pipeline error types.

use rebook_shared::types::Money;
use thiserror::Error;

use crate::closing::ClosingError;
use crate::ledger::LedgerError;
use crate::statement::StatementError;

/// Errors raised while closing and verifying fiscal years.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Closing transaction generation failed.
    #[error(transparent)]
    Closing(#[from] ClosingError),

    /// Statement computation failed during verification.
    #[error(transparent)]
    Statement(#[from] StatementError),

    /// Posting a generated transaction failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A closed year does not net to zero. This aborts the run; the books
    /// must not be handed off.
    #[error("Fiscal year {year} is out of balance by {residual}")]
    YearOutOfBalance {
        /// The offending year.
        year: i32,
        /// Balance sheet plus income statement balance.
        residual: Money,
    },
}
