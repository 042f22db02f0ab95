use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use potluck_shopping::Locale;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Plan snapshot (JSON)
    pub path: String,
    /// How many times failed leaves are retried after a toggle
    #[serde(default = "default_retries")]
    pub retries: u8,
}

fn default_retries() -> u8 {
    1
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (POTLUCK__STORE__PATH, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("store.path", "potluck.json")?
            .set_default("store.retries", 1)?
            .set_default("display.locale", "fr")?
            .set_default("observability.log_level", "info")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("POTLUCK")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.store.path.trim().is_empty() {
            return Err("Store path must not be empty".to_string());
        }
        Ok(())
    }
}
