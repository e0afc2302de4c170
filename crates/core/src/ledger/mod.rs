//! The double-entry ledger model.
//!
//! Accounts, fiscal years, transactions, and reimbursement links live in
//! the [`Books`] arena: flat, key-addressed tables referencing each other
//! by account name and transaction id. The legacy reader builds the books
//! through the validating mutation API; everything downstream (statements,
//! closing, verification) only reads.

pub mod account;
pub mod books;
pub mod error;
pub mod reimbursement;
pub mod transaction;
pub mod year;

#[cfg(test)]
mod transaction_props;

pub use account::{Account, AccountCategory, AccountGroup, FiscalYearAccount, Side};
pub use books::Books;
pub use error::LedgerError;
pub use reimbursement::{ItemRef, Reimbursement};
pub use transaction::{Item, Transaction};
pub use year::FiscalYear;
