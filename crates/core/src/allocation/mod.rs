//! Integer-cent allocation across near-equal account balances.
//!
//! The [`Distributor`] splits a signed cent amount over a set of accounts
//! so that the resulting balances stay within one cent of each other, and
//! can equalize drifted balances without outside money. It is the engine
//! behind every generated closing transaction.

pub mod distributor;
pub mod error;

#[cfg(test)]
mod distributor_props;

pub use distributor::Distributor;
pub use error::AllocationError;
