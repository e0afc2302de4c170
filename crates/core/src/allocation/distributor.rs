//! The balance distributor.

use rebook_shared::types::{AccountName, Money};

use super::error::AllocationError;

/// One registered account with its running balance and the cents moved so
/// far.
#[derive(Debug, Clone)]
struct Slot {
    account: AccountName,
    balance: Money,
    item_amount: Money,
}

/// Splits a signed cent amount across accounts whose balances are equal or
/// at most one cent apart, keeping them that way.
///
/// A distributor is built for one closing operation and discarded after
/// the caller reads out the item amounts. Registration order matters: the
/// first-added account is the anchor that receives the odd cent when all
/// balances are exactly equal, and every min/max scan keeps the first
/// account it encounters on ties, so repeated runs over the same input
/// produce identical results.
///
/// The two-step split works on raw cents: [`distribute_amount`] adds the
/// truncated per-account quotient everywhere, deliberately leaving
/// `amount mod n` cents over, and [`distribute_remainder`] places those
/// one at a time.
///
/// [`distribute_amount`]: Self::distribute_amount
/// [`distribute_remainder`]: Self::distribute_remainder
#[derive(Debug, Clone)]
pub struct Distributor {
    amount: Money,
    slots: Vec<Slot>,
}

impl Distributor {
    /// Creates a distributor for the given signed amount.
    #[must_use]
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            slots: Vec::new(),
        }
    }

    /// Registers an account with its current balance.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::DuplicateAccount`] if the account is
    /// already registered.
    pub fn add_balance(
        &mut self,
        account: AccountName,
        balance: Money,
    ) -> Result<(), AllocationError> {
        if self.slots.iter().any(|slot| slot.account == account) {
            return Err(AllocationError::DuplicateAccount(account));
        }
        self.slots.push(Slot {
            account,
            balance,
            item_amount: Money::ZERO,
        });
        Ok(())
    }

    /// The amount this distributor was created for.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no accounts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if at least one balance is registered and no two
    /// balances are more than one cent apart.
    ///
    /// A false result is not an error by itself; callers decide whether an
    /// uneven set is fatal or just needs [`equalize`](Self::equalize)
    /// first.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.slots.is_empty() && self.spread() <= Money::CENT
    }

    /// Returns true if every registered balance is exactly equal.
    #[must_use]
    pub fn equal(&self) -> bool {
        self.slots
            .windows(2)
            .all(|pair| pair[0].balance == pair[1].balance)
    }

    /// Adds the truncated per-account quotient of the amount to every
    /// balance and item amount.
    ///
    /// Truncating division leaves `amount mod n` cents, carrying the sign
    /// of the amount, for [`distribute_remainder`](Self::distribute_remainder).
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NoBalances`] with no registered
    /// accounts, or [`AllocationError::UnevenBalances`] when the balances
    /// are more than one cent apart.
    pub fn distribute_amount(&mut self) -> Result<(), AllocationError> {
        self.require_valid()?;
        let quotient = Money::from_cents(self.amount.cents() / self.slots.len() as i64);
        for slot in &mut self.slots {
            slot.balance += quotient;
            slot.item_amount += quotient;
        }
        Ok(())
    }

    /// Places the remainder left by [`distribute_amount`](Self::distribute_amount)
    /// one cent at a time.
    ///
    /// Each step picks a target account: when all balances are exactly
    /// equal the cent goes to the anchor (first-added) account; otherwise
    /// a positive remainder tops up the first minimum-balance account and
    /// a negative remainder drains the first maximum-balance account. The
    /// loop runs at most `n - 1` times since `|amount mod n| < n`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NoBalances`] with no registered
    /// accounts. When the remainder is non-zero the balances must still be
    /// within one cent, else [`AllocationError::UnevenBalances`].
    pub fn distribute_remainder(&mut self) -> Result<(), AllocationError> {
        if self.slots.is_empty() {
            return Err(AllocationError::NoBalances);
        }
        let mut remainder = self.amount.cents() % self.slots.len() as i64;
        if remainder == 0 {
            return Ok(());
        }
        self.require_valid()?;

        while remainder != 0 {
            let index = if self.equal() {
                // Deterministic anchor: the first account ever added.
                0
            } else if remainder > 0 {
                self.min_index()
            } else {
                self.max_index()
            };
            let cent = Money::from_cents(remainder.signum());
            self.slots[index].balance += cent;
            self.slots[index].item_amount += cent;
            remainder -= remainder.signum();
        }
        Ok(())
    }

    /// Moves single cents from the maximum-balance account to the
    /// minimum-balance account until the spread is at most one cent.
    ///
    /// Built for the drift-correction step, where the amount is zero and
    /// the balances start unequal; the item amounts record the transfers
    /// and always sum to zero. Returns whether anything moved.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NoBalances`] with no registered
    /// accounts.
    pub fn equalize(&mut self) -> Result<bool, AllocationError> {
        if self.slots.is_empty() {
            return Err(AllocationError::NoBalances);
        }
        let mut moved = false;
        while self.spread() > Money::CENT {
            let from = self.max_index();
            let to = self.min_index();
            self.slots[from].balance -= Money::CENT;
            self.slots[from].item_amount -= Money::CENT;
            self.slots[to].balance += Money::CENT;
            self.slots[to].item_amount += Money::CENT;
            moved = true;
        }
        Ok(moved)
    }

    /// The first account holding the maximum balance.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NoBalances`] with no registered
    /// accounts.
    pub fn max_balance_account(&self) -> Result<&AccountName, AllocationError> {
        if self.slots.is_empty() {
            return Err(AllocationError::NoBalances);
        }
        Ok(&self.slots[self.max_index()].account)
    }

    /// The first account holding the minimum balance.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::NoBalances`] with no registered
    /// accounts.
    pub fn min_balance_account(&self) -> Result<&AccountName, AllocationError> {
        if self.slots.is_empty() {
            return Err(AllocationError::NoBalances);
        }
        Ok(&self.slots[self.min_index()].account)
    }

    /// The cents moved into (positive) or out of (negative) one account.
    #[must_use]
    pub fn item_amount(&self, account: &AccountName) -> Option<Money> {
        self.slots
            .iter()
            .find(|slot| &slot.account == account)
            .map(|slot| slot.item_amount)
    }

    /// Item amounts for all accounts, in registration order.
    pub fn item_amounts(&self) -> impl Iterator<Item = (&AccountName, Money)> {
        self.slots
            .iter()
            .map(|slot| (&slot.account, slot.item_amount))
    }

    /// Current balances for all accounts, in registration order.
    pub fn balances(&self) -> impl Iterator<Item = (&AccountName, Money)> {
        self.slots.iter().map(|slot| (&slot.account, slot.balance))
    }

    fn require_valid(&self) -> Result<(), AllocationError> {
        if self.slots.is_empty() {
            return Err(AllocationError::NoBalances);
        }
        let spread = self.spread();
        if spread > Money::CENT {
            return Err(AllocationError::UnevenBalances { spread });
        }
        Ok(())
    }

    /// Difference between the maximum and minimum balance; zero when fewer
    /// than two accounts are registered.
    fn spread(&self) -> Money {
        match (
            self.slots.iter().map(|slot| slot.balance).max(),
            self.slots.iter().map(|slot| slot.balance).min(),
        ) {
            (Some(max), Some(min)) => max - min,
            _ => Money::ZERO,
        }
    }

    /// Index of the first slot holding the maximum balance.
    fn max_index(&self) -> usize {
        let mut best = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.balance > self.slots[best].balance {
                best = index;
            }
        }
        best
    }

    /// Index of the first slot holding the minimum balance.
    fn min_index(&self) -> usize {
        let mut best = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.balance < self.slots[best].balance {
                best = index;
            }
        }
        best
    }
}
