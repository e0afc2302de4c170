//! Shared types and configuration for Rebook.
//!
//! This crate provides common types used across all other crates:
//! - Integer-cent money with decimal conversion at the boundaries
//! - Typed name keys and transaction ids
//! - Migration configuration management

pub mod config;
pub mod types;

pub use config::MigrationConfig;
pub use types::{AccountName, EntityName, GroupName, Money, MoneyError, NameError, TransactionId};
