//! Capital structure and year-end closing transaction generation.
//!
//! A [`CapitalStructure`] names the income-summary account and the
//! owners' capital entities. From a built year it generates the closing
//! entries: the capital-adjustment transaction correcting legacy cent
//! drift, the income-summary-to-capital transfer splitting the year's
//! result across the owners, and the per-owner distribution sweeps.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ClosingError;
pub use types::{CapitalEntity, CapitalStructure};
