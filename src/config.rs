//! Application configuration.
//!
//! Settings load from `config/config.toml` (optional) with environment
//! variables taking precedence, e.g. `INNKEEPER__PAGINATION__DEFAULT_LIMIT`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Page-size bounds for the admin booking listing.
#[derive(Debug, Deserialize, Clone)]
pub struct PaginationConfig {
    #[serde(default = "default_page_limit")]
    pub default_limit: u64,
    #[serde(default = "max_page_limit")]
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_page_limit(),
            max_limit: max_page_limit(),
        }
    }
}

fn default_page_limit() -> u64 {
    10
}

fn max_page_limit() -> u64 {
    100
}

impl AppConfig {
    /// Load the configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        // Build configuration by reading the TOML file (optional) and environment variables
        let builder = Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("INNKEEPER").separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // If the file existed but was unreadable, warn and retry with env only
                if std::path::Path::new("config/config.toml").exists() {
                    log::warn!("failed to load config file, falling back to env: {err}");
                }
                Config::builder()
                    .add_source(Environment::with_prefix("INNKEEPER").separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                        ))
                    })?
            }
        };

        settings.try_deserialize::<AppConfig>().map_err(|e| {
            ConfigError::Message(format!("Configuration could not be deserialized: {e}"))
        })
    }

    /// Resolve a requested page limit against the configured bounds.
    ///
    /// `None` yields the default; anything above the maximum is clamped;
    /// zero is bumped to 1.
    pub fn resolve_limit(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.pagination.default_limit)
            .clamp(1, self.pagination.max_limit)
    }
}
