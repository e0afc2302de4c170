//! Reimbursement links between receivable items and the items settling them.

use rebook_shared::types::{Money, TransactionId};
use serde::{Deserialize, Serialize};

/// Reference to one item inside one transaction.
///
/// Items never move or disappear once their transaction is posted, so the
/// (transaction id, item index) pair is a stable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    /// The transaction holding the item.
    pub transaction: TransactionId,
    /// Index of the item within the transaction.
    pub item: usize,
}

impl ItemRef {
    /// Creates an item reference.
    #[must_use]
    pub const fn new(transaction: TransactionId, item: usize) -> Self {
        Self { transaction, item }
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.transaction, self.item)
    }
}

/// A settled (or written-off) part of a receivable item.
///
/// Ties the receivable item to the reimbursing item with the settled amount
/// and an optional allocated (written-off) amount. Validation happens in
/// [`Books::link_reimbursement`](super::Books::link_reimbursement); the link
/// itself is passive data, visible from both items.
#[derive(Debug, Clone, Serialize)]
pub struct Reimbursement {
    /// The receivable item being settled.
    pub receivable: ItemRef,
    /// The item settling it.
    pub reimbursing: ItemRef,
    /// Amount settled by the reimbursing item.
    pub reimbursed: Money,
    /// Written-off amount; zero when the caller supplied none.
    pub allocated: Money,
}

impl Reimbursement {
    /// The settled plus written-off amount this link consumes of the
    /// receivable.
    #[must_use]
    pub fn consumed(&self) -> Money {
        self.reimbursed + self.allocated
    }

    /// Returns true if this link touches the given item on either side.
    #[must_use]
    pub fn involves(&self, item: ItemRef) -> bool {
        self.receivable == item || self.reimbursing == item
    }
}
