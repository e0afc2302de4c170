//! Property-based tests for the distributor invariants.

use proptest::prelude::*;
use rebook_shared::types::{AccountName, Money};

use super::distributor::Distributor;

fn account(index: usize) -> AccountName {
    AccountName::new(format!("Account {index}")).unwrap()
}

/// A distributor with `count` accounts all starting at `base` cents.
fn equal_start(amount: i64, count: usize, base: i64) -> Distributor {
    let mut distributor = Distributor::new(Money::from_cents(amount));
    for index in 0..count {
        distributor
            .add_balance(account(index), Money::from_cents(base))
            .unwrap();
    }
    distributor
}

fn balances(distributor: &Distributor) -> Vec<i64> {
    distributor.balances().map(|(_, b)| b.cents()).collect()
}

fn item_amounts(distributor: &Distributor) -> Vec<i64> {
    distributor.item_amounts().map(|(_, a)| a.cents()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any amount split over equal accounts ends within one cent of
    /// pairwise spread, with the item amounts summing to the amount
    /// exactly.
    #[test]
    fn prop_distribution_keeps_spread_within_one_cent(
        amount in -10_000_000i64..10_000_000,
        count in 1usize..=12,
        base in -1_000_000i64..1_000_000,
    ) {
        let mut distributor = equal_start(amount, count, base);
        distributor.distribute_amount().unwrap();
        distributor.distribute_remainder().unwrap();

        let balances = balances(&distributor);
        let max = *balances.iter().max().unwrap();
        let min = *balances.iter().min().unwrap();
        prop_assert!(max - min <= 1, "spread {} exceeds one cent", max - min);
        prop_assert_eq!(item_amounts(&distributor).iter().sum::<i64>(), amount);
    }

    /// A one-cent starting spread is also a legal precondition.
    #[test]
    fn prop_near_equal_start_is_preserved(
        amount in -1_000_000i64..1_000_000,
        count in 2usize..=8,
        base in -100_000i64..100_000,
    ) {
        let mut distributor = Distributor::new(Money::from_cents(amount));
        // First account one cent ahead of the rest.
        distributor
            .add_balance(account(0), Money::from_cents(base + 1))
            .unwrap();
        for index in 1..count {
            distributor
                .add_balance(account(index), Money::from_cents(base))
                .unwrap();
        }
        prop_assert!(distributor.is_valid());

        distributor.distribute_amount().unwrap();
        distributor.distribute_remainder().unwrap();

        let balances = balances(&distributor);
        let spread = balances.iter().max().unwrap() - balances.iter().min().unwrap();
        prop_assert!(spread <= 1);
        prop_assert_eq!(item_amounts(&distributor).iter().sum::<i64>(), amount);
    }

    /// The same input distributed twice gives identical per-account
    /// results.
    #[test]
    fn prop_distribution_is_deterministic(
        amount in -1_000_000i64..1_000_000,
        count in 1usize..=10,
        base in -100_000i64..100_000,
    ) {
        let mut first = equal_start(amount, count, base);
        let mut second = first.clone();

        first.distribute_amount().unwrap();
        first.distribute_remainder().unwrap();
        second.distribute_amount().unwrap();
        second.distribute_remainder().unwrap();

        prop_assert_eq!(balances(&first), balances(&second));
        prop_assert_eq!(item_amounts(&first), item_amounts(&second));
    }

    /// Equalize converges to a spread of at most one cent, conserves the
    /// total, and moves cents without creating or destroying any.
    #[test]
    fn prop_equalize_converges_and_conserves(
        starts in prop::collection::vec(-100_000i64..100_000, 1..=10),
    ) {
        let mut distributor = Distributor::new(Money::ZERO);
        for (index, start) in starts.iter().enumerate() {
            distributor
                .add_balance(account(index), Money::from_cents(*start))
                .unwrap();
        }

        let moved = distributor.equalize().unwrap();

        let balances = balances(&distributor);
        let spread = balances.iter().max().unwrap() - balances.iter().min().unwrap();
        prop_assert!(spread <= 1);
        prop_assert_eq!(balances.iter().sum::<i64>(), starts.iter().sum::<i64>());
        prop_assert_eq!(item_amounts(&distributor).iter().sum::<i64>(), 0);

        let started_even =
            starts.iter().max().unwrap() - starts.iter().min().unwrap() <= 1;
        prop_assert_eq!(moved, !started_even);
    }
}
