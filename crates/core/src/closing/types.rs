//! Capital entities and the validated capital structure.

use std::collections::BTreeSet;

use rebook_shared::config::ClosingConfig;
use rebook_shared::types::{AccountName, EntityName};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::error::ClosingError;

/// One owner or partner in the capital structure.
#[derive(Debug, Clone, Serialize)]
pub struct CapitalEntity {
    name: EntityName,
    capital_account: AccountName,
    distribution_account: Option<AccountName>,
    ownership: Decimal,
}

impl CapitalEntity {
    /// Creates an entity.
    ///
    /// The ownership fraction is normalized to three decimal places,
    /// rounding halves away from zero, and defaults to 1 when absent
    /// (sole-owner structures).
    #[must_use]
    pub fn new(
        name: EntityName,
        capital_account: AccountName,
        distribution_account: Option<AccountName>,
        ownership: Option<Decimal>,
    ) -> Self {
        let ownership = ownership
            .unwrap_or(Decimal::ONE)
            .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
        Self {
            name,
            capital_account,
            distribution_account,
            ownership,
        }
    }

    /// The entity name.
    #[must_use]
    pub fn name(&self) -> &EntityName {
        &self.name
    }

    /// The entity's capital account.
    #[must_use]
    pub fn capital_account(&self) -> &AccountName {
        &self.capital_account
    }

    /// The entity's distribution (drawing) account, if it has one.
    #[must_use]
    pub fn distribution_account(&self) -> Option<&AccountName> {
        self.distribution_account.as_ref()
    }

    /// The normalized ownership fraction.
    #[must_use]
    pub fn ownership(&self) -> Decimal {
        self.ownership
    }
}

/// The income-summary account plus the ordered list of capital entities.
///
/// Validated at construction: at least one entity, no shared capital
/// accounts, and ownership fractions summing to exactly 1. Closing can
/// then assume the structure is sound.
#[derive(Debug, Clone, Serialize)]
pub struct CapitalStructure {
    income_summary: AccountName,
    entities: Vec<CapitalEntity>,
}

impl CapitalStructure {
    /// Creates a validated capital structure.
    ///
    /// # Errors
    ///
    /// Returns [`ClosingError::NoEntities`] for an empty entity list,
    /// [`ClosingError::DuplicateCapitalAccount`] when two entities share a
    /// capital account, and [`ClosingError::OwnershipNotUnity`] unless the
    /// ownership fractions sum to exactly 1.
    pub fn new(
        income_summary: AccountName,
        entities: Vec<CapitalEntity>,
    ) -> Result<Self, ClosingError> {
        if entities.is_empty() {
            return Err(ClosingError::NoEntities);
        }
        let mut seen: BTreeSet<&AccountName> = BTreeSet::new();
        for entity in &entities {
            if !seen.insert(&entity.capital_account) {
                return Err(ClosingError::DuplicateCapitalAccount(
                    entity.capital_account.clone(),
                ));
            }
        }
        let total: Decimal = entities.iter().map(CapitalEntity::ownership).sum();
        if total != Decimal::ONE {
            return Err(ClosingError::OwnershipNotUnity { total });
        }
        Ok(Self {
            income_summary,
            entities,
        })
    }

    /// Builds the structure from loaded configuration, validating names
    /// and applying the ownership default.
    ///
    /// # Errors
    ///
    /// Returns name-validation errors plus everything
    /// [`CapitalStructure::new`] rejects.
    pub fn from_config(config: &ClosingConfig) -> Result<Self, ClosingError> {
        let income_summary = AccountName::new(config.income_summary.clone())?;
        let entities = config
            .entities
            .iter()
            .map(|entity| {
                let distribution_account = entity
                    .distribution_account
                    .as_ref()
                    .map(|account| AccountName::new(account.clone()))
                    .transpose()?;
                Ok(CapitalEntity::new(
                    EntityName::new(entity.name.clone())?,
                    AccountName::new(entity.capital_account.clone())?,
                    distribution_account,
                    entity.ownership,
                ))
            })
            .collect::<Result<Vec<_>, ClosingError>>()?;
        Self::new(income_summary, entities)
    }

    /// The income-summary account the closing entries draw from.
    #[must_use]
    pub fn income_summary(&self) -> &AccountName {
        &self.income_summary
    }

    /// The capital entities, in configured order.
    #[must_use]
    pub fn entities(&self) -> &[CapitalEntity] {
        &self.entities
    }
}
