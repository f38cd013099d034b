//! Puzzle provider configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::guardian::{GuardianConfig, DEFAULT_BASE_URL};

use super::error::ConfigValidationError;

/// Puzzle provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Crossword section root on the Guardian site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Serve puzzles from `<dir>/<kind>/<number>.json` instead of the network
    pub fixtures_dir: Option<String>,
}

impl ProviderConfig {
    /// Directory to read puzzles from, if fixtures are configured.
    pub fn fixtures_path(&self) -> Option<PathBuf> {
        self.fixtures_dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }

    pub fn guardian(&self) -> GuardianConfig {
        GuardianConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Validate provider configuration
    pub fn validate(&self, is_production: bool) -> Result<(), ConfigValidationError> {
        let https = self.base_url.starts_with("https://");
        if !https && !self.base_url.starts_with("http://") {
            return Err(ConfigValidationError::InvalidProviderUrl);
        }
        if is_production && !https && self.fixtures_path().is_none() {
            return Err(ConfigValidationError::ProviderUrlMustBeHttps);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidProviderTimeout);
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            fixtures_dir: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    15
}
