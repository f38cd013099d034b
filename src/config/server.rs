//! HTTP listener settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ConfigValidationError;

/// Longest request timeout accepted for the puzzle routes.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where and how the server listens.
///
/// Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Upper bound on a puzzle request, upstream fetch included.
    pub request_timeout_secs: u64,
    /// Comma-separated browser origins; unset allows any origin.
    pub cors_origins: Option<String>,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: Environment::Development,
            log_level: "info,crossword_together=debug,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// Listener address; `host` must be an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigValidationError::InvalidBindAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured origins, blanks dropped. Empty means any origin.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .flat_map(|list| list.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces_port_5000() {
        let config = ServerConfig::default();

        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5000");
        assert!(!config.is_production());
        assert!(config.log_level.contains("crossword_together=debug"));
        assert!(config.cors_origins_list().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"port": 8080, "environment": "production"}"#).unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn hostnames_are_not_bind_addresses() {
        let config = ServerConfig {
            host: "crosswords.local".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidBindAddress(
                "crosswords.local:5000".to_string()
            ))
        );
    }

    #[test]
    fn front_end_origins_are_split_and_trimmed() {
        let config = ServerConfig {
            cors_origins: Some(" https://play.example.org ,,http://localhost:5173,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://play.example.org", "http://localhost:5173"]
        );
    }

    #[test]
    fn zero_port_and_out_of_range_timeouts_are_rejected() {
        let zero_port = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(zero_port.validate(), Err(ConfigValidationError::InvalidPort));

        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
        }
    }
}
