//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger core configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Load simulator configuration.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Ledger core configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// How many candidate card numbers `CreateAccount` draws before giving up.
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,
}

fn default_max_id_attempts() -> u32 {
    32
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_id_attempts: default_max_id_attempts(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Load simulator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Number of accounts to open before the run.
    #[serde(default = "default_accounts")]
    pub accounts: usize,
    /// Number of purchase/recharge operations to issue.
    #[serde(default = "default_operations")]
    pub operations: usize,
    /// Worker threads; rayon picks when unset.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Credit limit given to every simulated account.
    #[serde(default = "default_credit_limit")]
    pub credit_limit: Decimal,
    /// Upper bound for a single random amount.
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,
}

fn default_accounts() -> usize {
    8
}

fn default_operations() -> usize {
    10_000
}

fn default_credit_limit() -> Decimal {
    Decimal::ONE_THOUSAND
}

fn default_max_amount() -> Decimal {
    Decimal::new(250, 0)
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            operations: default_operations(),
            threads: None,
            credit_limit: default_credit_limit(),
            max_amount: default_max_amount(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `CARDLEDGER__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("CARDLEDGER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
