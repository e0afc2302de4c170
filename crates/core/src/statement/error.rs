//! Statement computation errors.

use rebook_shared::types::TransactionId;
use thiserror::Error;

/// Errors raised while computing rollups and statements.
#[derive(Debug, Error)]
pub enum StatementError {
    /// The requested fiscal year is not in the books.
    #[error("Fiscal year {0} not found")]
    YearNotFound(i32),

    /// The year's index references a transaction the books do not hold.
    /// Indicates corruption, not bad input.
    #[error("Fiscal year index references missing transaction {0}")]
    MissingTransaction(TransactionId),
}
