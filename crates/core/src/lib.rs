//! Accounting core for rebook.
//!
//! This crate contains pure business logic with ZERO file or database
//! dependencies. Legacy records are loaded by an external reader, posted
//! into the in-memory [`ledger::Books`], closed year by year through
//! [`pipeline::MigrationService`], and handed off to an external
//! persistence layer once every fiscal year verifies to zero.
//!
//! # Modules
//!
//! - `ledger` - Accounts, fiscal years, transactions, and the books arena
//! - `statement` - Per-account rollups and balance-sheet/income-statement totals
//! - `allocation` - Integer-cent distribution across near-equal account balances
//! - `closing` - Capital structure and year-end closing transaction generators
//! - `pipeline` - Migration driver: close years, verify balance invariants

pub mod allocation;
pub mod closing;
pub mod ledger;
pub mod pipeline;
pub mod statement;
