//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Heartbeat interval must be between 1 and 300 seconds")]
    InvalidHeartbeatInterval,

    #[error("Send timeout must be greater than zero")]
    InvalidSendTimeout,

    #[error("Outbox capacity must be greater than zero")]
    InvalidOutboxCapacity,

    #[error("Provider base URL must start with http:// or https://")]
    InvalidProviderUrl,

    #[error("Provider timeout must be greater than zero")]
    InvalidProviderTimeout,

    #[error("Provider base URL must use HTTPS in production")]
    ProviderUrlMustBeHttps,
}
