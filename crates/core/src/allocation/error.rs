//! Allocation error types.

use rebook_shared::types::{AccountName, Money};
use thiserror::Error;

/// Errors raised by the distributor.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// No balances have been registered.
    #[error("No account balances registered")]
    NoBalances,

    /// The same account was registered twice.
    #[error("Account {0} is already registered")]
    DuplicateAccount(AccountName),

    /// Registered balances are more than one cent apart.
    #[error("Registered balances are {spread} apart; at most one cent is allowed")]
    UnevenBalances {
        /// Difference between the maximum and minimum balance.
        spread: Money,
    },
}
