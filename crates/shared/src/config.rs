//! Migration configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Migration configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationConfig {
    /// Year-end closing configuration.
    pub closing: ClosingConfig,
    /// Migration behavior options.
    #[serde(default)]
    pub options: OptionsConfig,
}

/// Year-end closing configuration.
///
/// Names the income-summary account the closing entries debit and the
/// capital entities the closed result is distributed across.
#[derive(Debug, Clone, Deserialize)]
pub struct ClosingConfig {
    /// Income-statement summary account the closing transactions draw from.
    pub income_summary: String,
    /// Capital entities (owners/partners) receiving the closed result.
    ///
    /// Structurally optional so env-only configuration loads; closing a year
    /// with no entities fails when the capital structure is built.
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
}

/// A single capital entity in the closing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityConfig {
    /// Entity (owner/partner) name.
    pub name: String,
    /// Capital account the entity's share of net income is booked to.
    pub capital_account: String,
    /// Distribution (drawing) account swept into capital at year end.
    #[serde(default)]
    pub distribution_account: Option<String>,
    /// Ownership fraction; all fractions together must sum to exactly 1.
    ///
    /// Defaults to 1 when omitted (sole-owner structures).
    #[serde(default)]
    pub ownership: Option<Decimal>,
}

/// Migration behavior options.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Re-verify statement balance invariants after closing each year.
    #[serde(default = "default_verify_after_close")]
    pub verify_after_close: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            verify_after_close: default_verify_after_close(),
        }
    }
}

fn default_verify_after_close() -> bool {
    true
}

impl MigrationConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
