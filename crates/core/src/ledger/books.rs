//! The books: flat, id-keyed tables for all ledger entities.
//!
//! Accounts, groups, years, and transactions live in their own maps and
//! reference each other by name or id only. Relationships that the legacy
//! data modeled as object cycles (account to year link to year, item to
//! reimbursement to item) are plain key references here, which keeps
//! ownership single-rooted and makes the whole structure serializable.
//!
//! All mutation goes through the validating methods below; read access
//! hands out shared references and iterators only.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rebook_shared::types::{AccountName, GroupName, Money, TransactionId};
use serde::Serialize;

use super::account::{Account, AccountCategory, AccountGroup, FiscalYearAccount, Side};
use super::error::LedgerError;
use super::reimbursement::{ItemRef, Reimbursement};
use super::transaction::{Item, Transaction};
use super::year::FiscalYear;

/// In-memory double-entry books for a whole migration run.
#[derive(Debug, Serialize)]
pub struct Books {
    accounts: BTreeMap<AccountName, Account>,
    groups: BTreeMap<GroupName, AccountGroup>,
    years: BTreeMap<i32, FiscalYear>,
    transactions: BTreeMap<TransactionId, Transaction>,
    reimbursements: Vec<Reimbursement>,
    next_synthetic: i64,
}

impl Default for Books {
    fn default() -> Self {
        Self::new()
    }
}

impl Books {
    /// Creates empty books.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
            groups: BTreeMap::new(),
            years: BTreeMap::new(),
            transactions: BTreeMap::new(),
            reimbursements: Vec::new(),
            next_synthetic: TransactionId::FIRST_SYNTHETIC.value(),
        }
    }

    // ========== Reference Data ==========

    /// Registers an account group.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateGroup`] if the name is taken.
    pub fn add_group(&mut self, group: AccountGroup) -> Result<(), LedgerError> {
        if self.groups.contains_key(&group.name) {
            return Err(LedgerError::DuplicateGroup(group.name));
        }
        self.groups.insert(group.name.clone(), group);
        Ok(())
    }

    /// Registers an account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAccount`] if the name is taken.
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&account.name) {
            return Err(LedgerError::DuplicateAccount(account.name));
        }
        self.accounts.insert(account.name.clone(), account);
        Ok(())
    }

    /// Registers a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateYear`] for a repeated year number and
    /// [`LedgerError::OverlappingYears`] when the date window intersects an
    /// existing year.
    pub fn add_year(&mut self, year: FiscalYear) -> Result<(), LedgerError> {
        if self.years.contains_key(&year.year()) {
            return Err(LedgerError::DuplicateYear(year.year()));
        }
        if let Some(other) = self.years.values().find(|existing| existing.overlaps(&year)) {
            return Err(LedgerError::OverlappingYears {
                year: year.year(),
                other: other.year(),
            });
        }
        self.years.insert(year.year(), year);
        Ok(())
    }

    /// Links an account into a fiscal year with its classification and
    /// presentation order for that year.
    ///
    /// # Errors
    ///
    /// Returns an error if the year, account, or group is unknown, or if the
    /// account is already linked in that year.
    pub fn link_account(
        &mut self,
        year: i32,
        account: &AccountName,
        category: AccountCategory,
        group: &GroupName,
        group_order: u32,
        account_order: u32,
    ) -> Result<(), LedgerError> {
        if !self.accounts.contains_key(account) {
            return Err(LedgerError::AccountNotFound(account.clone()));
        }
        if !self.groups.contains_key(group) {
            return Err(LedgerError::GroupNotFound(group.clone()));
        }
        let fiscal_year = self
            .years
            .get_mut(&year)
            .ok_or(LedgerError::YearNotFound(year))?;
        if fiscal_year.link(account).is_some() {
            return Err(LedgerError::DuplicateLink {
                account: account.clone(),
                year,
            });
        }
        fiscal_year.insert_link(FiscalYearAccount {
            year,
            account: account.clone(),
            category,
            group: group.clone(),
            group_order,
            account_order,
        });
        Ok(())
    }

    // ========== Posting ==========

    /// Mints the next id in the reserved range for generated transactions.
    ///
    /// Ids are monotonic, starting at [`TransactionId::FIRST_SYNTHETIC`];
    /// every id above all legacy ids.
    pub fn allocate_synthetic_id(&mut self) -> TransactionId {
        let id = TransactionId::new(self.next_synthetic);
        self.next_synthetic += 1;
        id
    }

    /// Validates and posts a transaction.
    ///
    /// The transaction must pass [`Transaction::validate`], carry an id that
    /// is neither taken nor inside the unallocated part of the reserved
    /// range, be dated inside exactly one fiscal year window, and touch only
    /// accounts linked into that year.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule; the books are unchanged on error.
    pub fn post_transaction(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        // 1. Double-entry shape.
        transaction.validate()?;

        // 2. Id rules: unique, and never inside the unallocated reserved range.
        let id = transaction.id();
        if id.is_synthetic() && id.value() >= self.next_synthetic {
            return Err(LedgerError::ReservedId(id));
        }
        if self.transactions.contains_key(&id) {
            return Err(LedgerError::DuplicateTransaction(id));
        }

        // 3. Route by date to the covering fiscal year.
        let date = transaction.date();
        let year = self
            .years
            .values()
            .find(|fiscal_year| fiscal_year.contains(date))
            .map(FiscalYear::year)
            .ok_or(LedgerError::NoYearForDate(date))?;

        // 4. Every touched account must exist and be active in that year.
        let mut touched: BTreeSet<AccountName> = BTreeSet::new();
        for item in transaction.items() {
            if !self.accounts.contains_key(item.account()) {
                return Err(LedgerError::AccountNotFound(item.account().clone()));
            }
            if self.years[&year].link(item.account()).is_none() {
                return Err(LedgerError::AccountNotActive {
                    account: item.account().clone(),
                    year,
                });
            }
            touched.insert(item.account().clone());
        }

        // 5. Record membership and index per account.
        if let Some(fiscal_year) = self.years.get_mut(&year) {
            fiscal_year.index_transaction(id, touched);
        }
        self.transactions.insert(id, transaction);
        Ok(())
    }

    /// Materializes an opening balance as a single-item balance transaction
    /// with a freshly minted synthetic id, and posts it.
    ///
    /// # Errors
    ///
    /// Returns the posting error; no id is consumed on validation failure
    /// ahead of the mint.
    pub fn post_opening_balance(
        &mut self,
        account: &AccountName,
        date: NaiveDate,
        amount: Money,
        side: Side,
    ) -> Result<TransactionId, LedgerError> {
        let item = Item::new(account.clone(), amount, side)?;
        let id = self.allocate_synthetic_id();
        let mut transaction = Transaction::new_balance(id, "Opening balance", date);
        transaction.push_item(item);
        self.post_transaction(transaction)?;
        Ok(id)
    }

    // ========== Reimbursements ==========

    /// Links a reimbursing item to a receivable item.
    ///
    /// A missing allocated (written-off) amount defaults to zero.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ItemNotFound`] if either reference is dangling;
    /// - [`LedgerError::NotReceivable`] unless the receivable side is a debit
    ///   item against a receivable account;
    /// - [`LedgerError::ReimbursementAccountMismatch`] when the two items
    ///   reference different accounts;
    /// - [`LedgerError::NegativeAmount`] for negative amounts;
    /// - [`LedgerError::ReimbursementExceedsSource`] when the reimbursed
    ///   amount exceeds the reimbursing item's amount;
    /// - [`LedgerError::ReimbursementExceedsReceivable`] when the cumulative
    ///   reimbursed plus allocated amounts, including this link, exceed the
    ///   receivable's amount.
    ///
    /// The link set is unchanged after any failure.
    pub fn link_reimbursement(
        &mut self,
        receivable: ItemRef,
        reimbursing: ItemRef,
        reimbursed: Money,
        allocated: Option<Money>,
    ) -> Result<(), LedgerError> {
        let allocated = allocated.unwrap_or(Money::ZERO);

        let receivable_item = self
            .item(receivable)
            .ok_or(LedgerError::ItemNotFound(receivable))?;
        let reimbursing_item = self
            .item(reimbursing)
            .ok_or(LedgerError::ItemNotFound(reimbursing))?;

        let account = self
            .accounts
            .get(receivable_item.account())
            .ok_or_else(|| LedgerError::AccountNotFound(receivable_item.account().clone()))?;
        if receivable_item.side() != Side::Debit || !account.receivable {
            return Err(LedgerError::NotReceivable(receivable));
        }
        if receivable_item.account() != reimbursing_item.account() {
            return Err(LedgerError::ReimbursementAccountMismatch {
                receivable,
                reimbursing,
            });
        }
        if reimbursed.is_negative() || allocated.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        if reimbursed > reimbursing_item.amount() {
            return Err(LedgerError::ReimbursementExceedsSource {
                reimbursed,
                available: reimbursing_item.amount(),
            });
        }

        let already_consumed: Money = self
            .reimbursements
            .iter()
            .filter(|link| link.receivable == receivable)
            .map(Reimbursement::consumed)
            .sum();
        let total = already_consumed + reimbursed + allocated;
        if total > receivable_item.amount() {
            return Err(LedgerError::ReimbursementExceedsReceivable {
                total,
                receivable: receivable_item.amount(),
            });
        }

        self.reimbursements.push(Reimbursement {
            receivable,
            reimbursing,
            reimbursed,
            allocated,
        });
        Ok(())
    }

    // ========== Read Access ==========

    /// Looks up an account by name.
    #[must_use]
    pub fn account(&self, name: &AccountName) -> Option<&Account> {
        self.accounts.get(name)
    }

    /// Looks up an account group by name.
    #[must_use]
    pub fn group(&self, name: &GroupName) -> Option<&AccountGroup> {
        self.groups.get(name)
    }

    /// Looks up a fiscal year by number.
    #[must_use]
    pub fn year(&self, year: i32) -> Option<&FiscalYear> {
        self.years.get(&year)
    }

    /// Looks up a transaction by id.
    #[must_use]
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// Resolves an item reference.
    #[must_use]
    pub fn item(&self, item: ItemRef) -> Option<&Item> {
        self.transactions
            .get(&item.transaction)
            .and_then(|transaction| transaction.items().get(item.item))
    }

    /// All accounts, ordered by name.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// All groups, ordered by name.
    pub fn groups(&self) -> impl Iterator<Item = &AccountGroup> {
        self.groups.values()
    }

    /// All fiscal years, ascending.
    pub fn years(&self) -> impl Iterator<Item = &FiscalYear> {
        self.years.values()
    }

    /// All transactions, ordered by id.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// All reimbursement links, in creation order.
    #[must_use]
    pub fn reimbursements(&self) -> &[Reimbursement] {
        &self.reimbursements
    }

    /// Reimbursement links visible from either side of the given item.
    pub fn reimbursements_of(&self, item: ItemRef) -> impl Iterator<Item = &Reimbursement> {
        self.reimbursements
            .iter()
            .filter(move |link| link.involves(item))
    }

    /// Transactions touching one account within one fiscal year, by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::YearNotFound`] for an unknown year.
    pub fn transactions_in_year_for(
        &self,
        year: i32,
        account: &AccountName,
    ) -> Result<impl Iterator<Item = &Transaction>, LedgerError> {
        let fiscal_year = self.years.get(&year).ok_or(LedgerError::YearNotFound(year))?;
        Ok(fiscal_year
            .transactions_for(account)
            .filter_map(|id| self.transactions.get(&id)))
    }
}
