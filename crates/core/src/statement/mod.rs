//! Per-account rollups and statement totals.
//!
//! A [`Rollup`] nets one account's items over one fiscal year; a
//! [`Statement`] aggregates rollups into the balance sheet or the income
//! statement. For a fully built year the two statement balances sum to
//! exactly zero, which is the invariant the whole migration exists to
//! guarantee.

pub mod error;
pub mod report;
pub mod rollup;


pub use error::StatementError;
pub use report::{Statement, StatementKind};
pub use rollup::Rollup;
