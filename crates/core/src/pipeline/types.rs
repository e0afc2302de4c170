//! Pipeline result types.

use rebook_shared::types::{Money, TransactionId};
use serde::Serialize;

/// Ids of the transactions generated and posted while closing one year.
#[derive(Debug, Clone, Serialize)]
pub struct ClosingSummary {
    /// The closed year.
    pub year: i32,
    /// The capital-adjustment transaction, when drift correction was
    /// needed.
    pub adjustment: Option<TransactionId>,
    /// The income-to-capital transfer, when the year had a net result.
    pub income_to_capital: Option<TransactionId>,
    /// The per-entity distribution sweeps, in entity order.
    pub distributions: Vec<TransactionId>,
}

impl ClosingSummary {
    /// Total number of transactions posted for this year.
    #[must_use]
    pub fn posted_count(&self) -> usize {
        usize::from(self.adjustment.is_some())
            + usize::from(self.income_to_capital.is_some())
            + self.distributions.len()
    }
}

/// Statement balances recomputed for one year during verification.
#[derive(Debug, Clone, Serialize)]
pub struct YearCheck {
    /// The verified year.
    pub year: i32,
    /// Balance-sheet balance (debit negative, credit positive).
    pub balance_sheet: Money,
    /// Income-statement balance.
    pub income_statement: Money,
}

impl YearCheck {
    /// Balance sheet plus income statement; zero for a sound year.
    #[must_use]
    pub fn residual(&self) -> Money {
        self.balance_sheet + self.income_statement
    }

    /// Returns true if the year nets to exactly zero.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.residual().is_zero()
    }
}
