//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur while building the books:
//! transaction validation errors, reference-data errors, posting errors,
//! and reimbursement rule violations.

use chrono::NaiveDate;
use rebook_shared::types::{AccountName, GroupName, Money, TransactionId};
use thiserror::Error;

use super::reimbursement::ItemRef;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Transaction Validation Errors ==========
    /// Item amount cannot be negative.
    #[error("Item amount cannot be negative")]
    NegativeAmount,

    /// A balance transaction must carry exactly one item.
    #[error("Balance transaction must have exactly one item")]
    BalanceItemCount,

    /// An ordinary transaction must have at least 2 items.
    #[error("Transaction must have at least two items")]
    TooFewItems,

    /// Transaction items do not net to zero (debit negative, credit positive).
    #[error("Transaction is not balanced. Net: {sum}")]
    Unbalanced {
        /// Signed sum of all item amounts.
        sum: Money,
    },

    // ========== Reference Data Errors ==========
    /// Account name already registered.
    #[error("Account already exists: {0}")]
    DuplicateAccount(AccountName),

    /// Account group name already registered.
    #[error("Account group already exists: {0}")]
    DuplicateGroup(GroupName),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountName),

    /// Account group not found.
    #[error("Account group not found: {0}")]
    GroupNotFound(GroupName),

    /// Fiscal year already registered.
    #[error("Fiscal year {0} already exists")]
    DuplicateYear(i32),

    /// Fiscal year not found.
    #[error("Fiscal year {0} not found")]
    YearNotFound(i32),

    /// Fiscal year windows may not overlap.
    #[error("Fiscal year {year} overlaps fiscal year {other}")]
    OverlappingYears {
        /// The year being added.
        year: i32,
        /// The already-registered year it collides with.
        other: i32,
    },

    /// Fiscal year window ends before it starts.
    #[error("Fiscal year window ends before it starts ({start} to {end})")]
    InvalidYearWindow {
        /// Window start date.
        start: NaiveDate,
        /// Window end date.
        end: NaiveDate,
    },

    /// Fiscal year number cannot be expressed as calendar dates.
    #[error("Fiscal year {0} is outside the supported date range")]
    YearOutOfRange(i32),

    /// Account already linked into the fiscal year.
    #[error("Account {account} is already linked in fiscal year {year}")]
    DuplicateLink {
        /// The account being linked.
        account: AccountName,
        /// The target fiscal year.
        year: i32,
    },

    /// Account has no link in the fiscal year a transaction posts to.
    #[error("Account {account} is not active in fiscal year {year}")]
    AccountNotActive {
        /// The account missing a year link.
        account: AccountName,
        /// The fiscal year of the posting.
        year: i32,
    },

    // ========== Posting Errors ==========
    /// Transaction id already posted.
    #[error("Transaction {0} already exists")]
    DuplicateTransaction(TransactionId),

    /// Legacy transaction id collides with the reserved synthesized range.
    #[error("Transaction id {0} lies in the range reserved for generated transactions")]
    ReservedId(TransactionId),

    /// No fiscal year window covers the transaction date.
    #[error("No fiscal year covers date {0}")]
    NoYearForDate(NaiveDate),

    // ========== Reimbursement Errors ==========
    /// Item reference does not resolve to an item.
    #[error("Item {0} not found")]
    ItemNotFound(ItemRef),

    /// The receivable side of a reimbursement must be a debit item against
    /// a receivable account.
    #[error("Item {0} is not a receivable debit")]
    NotReceivable(ItemRef),

    /// Receivable and reimbursing items must reference the same account.
    #[error("Items {receivable} and {reimbursing} reference different accounts")]
    ReimbursementAccountMismatch {
        /// The receivable item.
        receivable: ItemRef,
        /// The reimbursing item.
        reimbursing: ItemRef,
    },

    /// Reimbursed amount exceeds the reimbursing item's amount.
    #[error("Reimbursed amount {reimbursed} exceeds reimbursing item amount {available}")]
    ReimbursementExceedsSource {
        /// The requested reimbursed amount.
        reimbursed: Money,
        /// The reimbursing item's total amount.
        available: Money,
    },

    /// Cumulative reimbursed plus allocated amounts exceed the receivable.
    #[error("Cumulative reimbursements of {total} exceed receivable amount {receivable}")]
    ReimbursementExceedsReceivable {
        /// Cumulative reimbursed + allocated including the new link.
        total: Money,
        /// The receivable item's amount.
        receivable: Money,
    },
}
