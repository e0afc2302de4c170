//! Closing error types.

use rebook_shared::types::{AccountName, Money, NameError};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::allocation::AllocationError;
use crate::ledger::LedgerError;
use crate::statement::StatementError;

/// Errors raised while building a capital structure or generating the
/// closing transactions for a year.
#[derive(Debug, Error)]
pub enum ClosingError {
    /// Ownership fractions must sum to exactly 1.
    #[error("Ownership fractions sum to {total}, expected exactly 1")]
    OwnershipNotUnity {
        /// Sum of all entity ownership fractions.
        total: Decimal,
    },

    /// A capital structure needs at least one entity.
    #[error("Capital structure has no entities")]
    NoEntities,

    /// Two entities share a capital account.
    #[error("Capital account {0} is used by more than one entity")]
    DuplicateCapitalAccount(AccountName),

    /// A configured account or entity name failed validation.
    #[error(transparent)]
    Name(#[from] NameError),

    /// The distributor rejected the capital balances.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Statement computation failed.
    #[error(transparent)]
    Statement(#[from] StatementError),

    /// A generated item was malformed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A generated closing transaction does not balance. This is a logic
    /// defect, not bad input; the year's closing must be aborted.
    #[error("Generated closing transaction for year {year} does not balance. Net: {sum}")]
    ClosingUnbalanced {
        /// The year being closed.
        year: i32,
        /// Signed sum of the generated items.
        sum: Money,
    },
}
