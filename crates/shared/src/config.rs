//! Application configuration management.

use serde::Deserialize;

use crate::error::AppError;
use crate::types::BasisPoints;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Billing defaults.
    #[serde(default)]
    pub billing: BillingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Defaults applied when a document or expense omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// VAT rate in basis points (810 = 8.1 %).
    #[serde(default = "default_tax_rate_bp")]
    pub default_tax_rate_bp: u32,
    /// ISO 4217 code all amounts are booked in.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Days between issue date and due date.
    #[serde(default = "default_payment_terms_days")]
    pub payment_terms_days: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_tax_rate_bp: default_tax_rate_bp(),
            currency: default_currency(),
            payment_terms_days: default_payment_terms_days(),
        }
    }
}

impl BillingConfig {
    /// Returns the configured default tax rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is above 10000 bp.
    pub fn default_tax_rate(&self) -> Result<BasisPoints, AppError> {
        BasisPoints::new(self.default_tax_rate_bp)
            .map_err(|e| AppError::Config(format!("billing.default_tax_rate_bp: {e}")))
    }
}

fn default_tax_rate_bp() -> u32 {
    BasisPoints::DEFAULT_TAX_RATE.value()
}

fn default_currency() -> String {
    "CHF".to_string()
}

fn default_payment_terms_days() -> u32 {
    30
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `FIDU__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("FIDU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), AppError> {
        self.billing.default_tax_rate()?;

        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::Config(
                "database.min_connections exceeds database.max_connections".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_env_with_defaults() {
        temp_env::with_vars(
            [
                ("FIDU__DATABASE__URL", Some("postgres://localhost/fidu_test")),
                ("FIDU__SERVER__PORT", Some("9090")),
                ("FIDU__BILLING__DEFAULT_TAX_RATE_BP", None::<&str>),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/fidu_test");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.billing.default_tax_rate_bp, 810);
                assert_eq!(config.billing.currency, "CHF");
                assert_eq!(config.billing.payment_terms_days, 30);
            },
        );
    }

    #[test]
    fn test_rejects_out_of_range_tax_rate() {
        temp_env::with_vars(
            [
                ("FIDU__DATABASE__URL", Some("postgres://localhost/fidu_test")),
                ("FIDU__BILLING__DEFAULT_TAX_RATE_BP", Some("12000")),
            ],
            || {
                let err = AppConfig::load().unwrap_err();
                assert!(matches!(err, AppError::Config(_)));
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_var_unset("FIDU__DATABASE__URL", || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_validate_pool_bounds() {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/fidu".to_string(),
                max_connections: 2,
                min_connections: 5,
            },
            billing: BillingConfig::default(),
        };
        assert!(config.validate().is_err());
    }
}
