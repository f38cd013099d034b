//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CROSSWORD_TOGETHER` prefix and nested values use double underscores as separators.
//! Every setting has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use crossword_together::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod hub;
mod provider;
mod server;

pub use error::{ConfigError, ConfigValidationError};
pub use hub::HubConfig;
pub use provider::ProviderConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Realtime hub tuning (heartbeat, delivery timeout, outbox size)
    #[serde(default)]
    pub hub: HubConfig,

    /// Puzzle source (Guardian site or local fixtures)
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CROSSWORD_TOGETHER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CROSSWORD_TOGETHER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CROSSWORD_TOGETHER__HUB__HEARTBEAT_INTERVAL_SECS=30` -> `hub.heartbeat_interval_secs = 30`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CROSSWORD_TOGETHER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.hub.validate()?;
        self.provider.validate(self.is_production())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
