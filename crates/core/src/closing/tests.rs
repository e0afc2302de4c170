//! Closing generator tests: structure validation, income-to-capital,
//! distribution sweeps, and drift correction.

use chrono::NaiveDate;
use rebook_shared::config::{ClosingConfig, EntityConfig};
use rebook_shared::types::{AccountName, EntityName, GroupName, Money, TransactionId};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ClosingError;
use super::types::{CapitalEntity, CapitalStructure};
use crate::allocation::AllocationError;
use crate::ledger::{
    Account, AccountCategory, AccountGroup, Books, FiscalYear, Item, Side, Transaction,
};

fn name(value: &str) -> AccountName {
    AccountName::new(value).unwrap()
}

fn entity(
    value: &str,
    capital: &str,
    distribution: Option<&str>,
    ownership: Option<Decimal>,
) -> CapitalEntity {
    CapitalEntity::new(
        EntityName::new(value).unwrap(),
        name(capital),
        distribution.map(name),
        ownership,
    )
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

/// Books with a 2024 year and the given chart, all linked.
fn books_with(chart: &[(&str, AccountCategory)]) -> Books {
    let mut books = Books::new();
    books.add_year(FiscalYear::calendar(2024).unwrap()).unwrap();
    books
        .add_group(AccountGroup {
            name: GroupName::new("Main").unwrap(),
        })
        .unwrap();
    for (order, (account, category)) in chart.iter().enumerate() {
        let side = match category {
            AccountCategory::Asset | AccountCategory::Expense => Side::Debit,
            _ => Side::Credit,
        };
        books
            .add_account(Account {
                name: name(account),
                description: (*account).to_owned(),
                side,
                receivable: false,
                category: *category,
            })
            .unwrap();
        books
            .link_account(
                2024,
                &name(account),
                *category,
                &GroupName::new("Main").unwrap(),
                1,
                u32::try_from(order).unwrap(),
            )
            .unwrap();
    }
    books
}

fn post(books: &mut Books, id: i64, debit: &str, credit: &str, cents: i64) {
    let mut tx = Transaction::new(TransactionId::new(id), "posting", date(6, 15));
    tx.push_item(Item::new(name(debit), Money::from_cents(cents), Side::Debit).unwrap());
    tx.push_item(Item::new(name(credit), Money::from_cents(cents), Side::Credit).unwrap());
    books.post_transaction(tx).unwrap();
}

fn opening(books: &mut Books, account: &str, cents: i64, side: Side) {
    books
        .post_opening_balance(&name(account), date(1, 1), Money::from_cents(cents), side)
        .unwrap();
}

// ========== Structure Validation ==========

#[rstest]
#[case(&[Some(dec!(0.5)), Some(dec!(0.5))], true)]
#[case(&[Some(dec!(0.667)), Some(dec!(0.333))], true)]
#[case(&[None], true)]
#[case(&[Some(dec!(0.5)), Some(dec!(0.4))], false)]
#[case(&[Some(dec!(0.5)), Some(dec!(0.501))], false)]
#[case(&[Some(dec!(0.334)), Some(dec!(0.333)), Some(dec!(0.333))], true)]
// Normalization to three places happens before the sum check.
#[case(&[Some(dec!(0.3334)), Some(dec!(0.3333)), Some(dec!(0.3333))], false)]
fn test_ownership_must_sum_to_one(#[case] fractions: &[Option<Decimal>], #[case] ok: bool) {
    let entities: Vec<CapitalEntity> = fractions
        .iter()
        .enumerate()
        .map(|(index, fraction)| entity(&format!("Owner {index}"), &format!("Capital {index}"), None, *fraction))
        .collect();
    let result = CapitalStructure::new(name("Income summary"), entities);
    if ok {
        result.unwrap();
    } else {
        assert!(matches!(result, Err(ClosingError::OwnershipNotUnity { .. })));
    }
}

#[test]
fn test_ownership_normalizes_to_three_places() {
    let partner = entity("A", "Capital A", None, Some(dec!(0.33349)));
    // Half-up at the third decimal place.
    assert_eq!(partner.ownership(), dec!(0.333));
    let partner = entity("B", "Capital B", None, Some(dec!(0.6665)));
    assert_eq!(partner.ownership(), dec!(0.667));
}

#[test]
fn test_structure_rejects_empty_and_duplicates() {
    assert!(matches!(
        CapitalStructure::new(name("Income summary"), Vec::new()),
        Err(ClosingError::NoEntities)
    ));
    assert!(matches!(
        CapitalStructure::new(
            name("Income summary"),
            vec![
                entity("A", "Capital", None, Some(dec!(0.5))),
                entity("B", "Capital", None, Some(dec!(0.5))),
            ],
        ),
        Err(ClosingError::DuplicateCapitalAccount(_))
    ));
}

#[test]
fn test_from_config() {
    let config = ClosingConfig {
        income_summary: "Income summary".to_owned(),
        entities: vec![
            EntityConfig {
                name: "Avery".to_owned(),
                capital_account: "Capital Avery".to_owned(),
                distribution_account: Some("Drawings Avery".to_owned()),
                ownership: Some(dec!(0.667)),
            },
            EntityConfig {
                name: "Sam".to_owned(),
                capital_account: "Capital Sam".to_owned(),
                distribution_account: None,
                ownership: Some(dec!(0.333)),
            },
        ],
    };
    let structure = CapitalStructure::from_config(&config).unwrap();
    assert_eq!(structure.income_summary().as_str(), "Income summary");
    assert_eq!(structure.entities().len(), 2);
    assert_eq!(
        structure.entities()[0].distribution_account().map(AccountName::as_str),
        Some("Drawings Avery")
    );

    let bad = ClosingConfig {
        income_summary: "   ".to_owned(),
        entities: Vec::new(),
    };
    assert!(matches!(
        CapitalStructure::from_config(&bad),
        Err(ClosingError::Name(_))
    ));
}

// ========== Income To Capital ==========

fn single_owner_books() -> (Books, CapitalStructure) {
    let mut books = books_with(&[
        ("Cash", AccountCategory::Asset),
        ("Capital", AccountCategory::Equity),
        ("Sales", AccountCategory::Income),
        ("Rent", AccountCategory::Expense),
        ("Income summary", AccountCategory::Income),
    ]);
    opening(&mut books, "Cash", 100_000, Side::Debit);
    opening(&mut books, "Capital", 100_000, Side::Credit);
    let structure = CapitalStructure::new(
        name("Income summary"),
        vec![entity("Owner", "Capital", None, None)],
    )
    .unwrap();
    (books, structure)
}

#[test]
fn test_income_to_capital_single_owner() {
    let (mut books, structure) = single_owner_books();
    post(&mut books, 1, "Cash", "Sales", 25_000);
    post(&mut books, 2, "Rent", "Cash", 10_000);

    let transaction = structure
        .income_to_capital_transaction(&mut books, 2024)
        .unwrap()
        .unwrap();

    assert!(transaction.id().is_synthetic());
    assert_eq!(transaction.date(), date(12, 31));
    assert!(transaction.is_valid());
    let items = transaction.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].account(), &name("Income summary"));
    assert_eq!(items[0].amount(), Money::from_cents(15_000));
    assert_eq!(items[0].side(), Side::Debit);
    assert_eq!(items[1].account(), &name("Capital"));
    assert_eq!(items[1].amount(), Money::from_cents(15_000));
    assert_eq!(items[1].side(), Side::Credit);
}

#[test]
fn test_income_to_capital_three_partners_anchor_rule() {
    let mut books = books_with(&[
        ("Cash", AccountCategory::Asset),
        ("Capital A", AccountCategory::Equity),
        ("Capital B", AccountCategory::Equity),
        ("Capital C", AccountCategory::Equity),
        ("Sales", AccountCategory::Income),
        ("Income summary", AccountCategory::Income),
    ]);
    // $100.00 of income, three equal (zero) capital balances.
    post(&mut books, 1, "Cash", "Sales", 10_000);

    let structure = CapitalStructure::new(
        name("Income summary"),
        vec![
            entity("A", "Capital A", None, Some(dec!(0.334))),
            entity("B", "Capital B", None, Some(dec!(0.333))),
            entity("C", "Capital C", None, Some(dec!(0.333))),
        ],
    )
    .unwrap();

    let transaction = structure
        .income_to_capital_transaction(&mut books, 2024)
        .unwrap()
        .unwrap();

    let items = transaction.items();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0].amount(), Money::from_cents(10_000));
    assert_eq!(items[0].side(), Side::Debit);
    // The odd cent lands on the first-registered (anchor) capital account.
    assert_eq!(items[1].account(), &name("Capital A"));
    assert_eq!(items[1].amount(), Money::from_cents(3_334));
    assert_eq!(items[2].amount(), Money::from_cents(3_333));
    assert_eq!(items[3].amount(), Money::from_cents(3_333));
    assert!(items[1..].iter().all(|item| item.side() == Side::Credit));
    assert!(transaction.is_valid());
}

#[test]
fn test_income_to_capital_net_loss_reverses_sides() {
    let (mut books, structure) = single_owner_books();
    post(&mut books, 1, "Rent", "Cash", 4_200);

    let transaction = structure
        .income_to_capital_transaction(&mut books, 2024)
        .unwrap()
        .unwrap();

    let items = transaction.items();
    assert_eq!(items[0].account(), &name("Income summary"));
    assert_eq!(items[0].side(), Side::Credit);
    assert_eq!(items[0].amount(), Money::from_cents(4_200));
    assert_eq!(items[1].account(), &name("Capital"));
    assert_eq!(items[1].side(), Side::Debit);
    assert!(transaction.is_valid());
}

#[test]
fn test_income_to_capital_zero_net_is_none() {
    let (mut books, structure) = single_owner_books();
    assert!(structure
        .income_to_capital_transaction(&mut books, 2024)
        .unwrap()
        .is_none());
}

#[test]
fn test_income_to_capital_rejects_uneven_capital() {
    let mut books = books_with(&[
        ("Cash", AccountCategory::Asset),
        ("Capital A", AccountCategory::Equity),
        ("Capital B", AccountCategory::Equity),
        ("Sales", AccountCategory::Income),
        ("Income summary", AccountCategory::Income),
    ]);
    // Capital accounts two cents apart: the distributor must refuse.
    opening(&mut books, "Capital A", 5_000, Side::Credit);
    opening(&mut books, "Capital B", 4_998, Side::Credit);
    post(&mut books, 1, "Cash", "Sales", 1_000);

    let structure = CapitalStructure::new(
        name("Income summary"),
        vec![
            entity("A", "Capital A", None, Some(dec!(0.5))),
            entity("B", "Capital B", None, Some(dec!(0.5))),
        ],
    )
    .unwrap();

    assert!(matches!(
        structure.income_to_capital_transaction(&mut books, 2024),
        Err(ClosingError::Allocation(AllocationError::UnevenBalances { .. }))
    ));
}

// ========== Distribution Transactions ==========

#[test]
fn test_distribution_sweeps_into_capital() {
    let mut books = books_with(&[
        ("Cash", AccountCategory::Asset),
        ("Capital A", AccountCategory::Equity),
        ("Capital B", AccountCategory::Equity),
        ("Drawings A", AccountCategory::Equity),
    ]);
    // Owner A drew $200.00 during the year (debit balance on Drawings A).
    post(&mut books, 1, "Drawings A", "Cash", 20_000);

    let structure = CapitalStructure::new(
        name("Income summary"),
        vec![
            entity("A", "Capital A", Some("Drawings A"), Some(dec!(0.5))),
            entity("B", "Capital B", None, Some(dec!(0.5))),
        ],
    )
    .unwrap();

    let transactions = structure.distribution_transactions(&mut books, 2024).unwrap();
    // Entity B has no distribution account and is skipped.
    assert_eq!(transactions.len(), 1);
    let items = transactions[0].items();
    assert_eq!(items[0].account(), &name("Drawings A"));
    assert_eq!(items[0].side(), Side::Credit);
    assert_eq!(items[0].amount(), Money::from_cents(20_000));
    assert_eq!(items[1].account(), &name("Capital A"));
    assert_eq!(items[1].side(), Side::Debit);
    assert!(transactions[0].is_valid());

    // Posting the sweep zeroes the drawings account.
    for transaction in transactions {
        books.post_transaction(transaction).unwrap();
    }
    let year = books.year(2024).unwrap();
    let drawings = crate::statement::Rollup::compute(&books, year, &name("Drawings A")).unwrap();
    assert_eq!(drawings.balance(), Money::ZERO);
}

#[test]
fn test_distribution_skips_zero_balances() {
    let books_chart = &[
        ("Cash", AccountCategory::Asset),
        ("Capital A", AccountCategory::Equity),
        ("Drawings A", AccountCategory::Equity),
    ];
    let mut books = books_with(books_chart);
    let structure = CapitalStructure::new(
        name("Income summary"),
        vec![entity("A", "Capital A", Some("Drawings A"), None)],
    )
    .unwrap();
    assert!(structure
        .distribution_transactions(&mut books, 2024)
        .unwrap()
        .is_empty());
}

// ========== Capital Adjustment ==========

#[test]
fn test_capital_adjustment_corrects_drift() {
    let mut books = books_with(&[
        ("Cash", AccountCategory::Asset),
        ("Capital A", AccountCategory::Equity),
        ("Capital B", AccountCategory::Equity),
    ]);
    // Legacy float residue: 50 cents of spread between the partners.
    opening(&mut books, "Capital A", 5_000, Side::Credit);
    opening(&mut books, "Capital B", 4_900, Side::Credit);

    let structure = CapitalStructure::new(
        name("Income summary"),
        vec![
            entity("A", "Capital A", None, Some(dec!(0.5))),
            entity("B", "Capital B", None, Some(dec!(0.5))),
        ],
    )
    .unwrap();

    let transaction = structure
        .capital_adjustment_transaction(&mut books, 2024)
        .unwrap()
        .unwrap();

    let items = transaction.items();
    assert_eq!(items.len(), 2);
    // 50 cents move from A (debited) to B (credited).
    assert_eq!(items[0].account(), &name("Capital A"));
    assert_eq!(items[0].side(), Side::Debit);
    assert_eq!(items[0].amount(), Money::from_cents(50));
    assert_eq!(items[1].account(), &name("Capital B"));
    assert_eq!(items[1].side(), Side::Credit);
    assert_eq!(items[1].amount(), Money::from_cents(50));
    assert!(transaction.is_valid());
}

#[test]
fn test_capital_adjustment_none_when_even() {
    let mut books = books_with(&[
        ("Capital A", AccountCategory::Equity),
        ("Capital B", AccountCategory::Equity),
    ]);
    opening(&mut books, "Capital A", 5_000, Side::Credit);
    opening(&mut books, "Capital B", 4_999, Side::Credit);

    let structure = CapitalStructure::new(
        name("Income summary"),
        vec![
            entity("A", "Capital A", None, Some(dec!(0.5))),
            entity("B", "Capital B", None, Some(dec!(0.5))),
        ],
    )
    .unwrap();

    assert!(structure
        .capital_adjustment_transaction(&mut books, 2024)
        .unwrap()
        .is_none());
}
