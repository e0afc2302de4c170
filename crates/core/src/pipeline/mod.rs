//! Migration driver: close fiscal years and verify the balance invariant.
//!
//! [`MigrationService`] runs the closing sequence for each year (capital
//! adjustment, income-to-capital, distribution sweeps), posts the
//! generated transactions back into the books, and re-checks that the
//! balance sheet and income statement net to exactly zero before the
//! books are handed off to persistence.

pub mod error;
pub mod service;
pub mod types;


pub use error::PipelineError;
pub use service::MigrationService;
pub use types::{ClosingSummary, YearCheck};
