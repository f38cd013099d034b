//! Realtime hub configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::hub::HubSettings;

use super::error::ConfigValidationError;

/// Hub configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    /// Seconds between heartbeats to every connection
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_secs: u64,

    /// Milliseconds a delivery may wait on a full outbox before eviction
    #[serde(default = "default_send_timeout")]
    pub send_timeout_ms: u64,

    /// Events queued per connection
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,
}

impl HubConfig {
    /// Domain settings for [`BroadcastHub`](crate::domain::hub::BroadcastHub).
    pub fn settings(&self) -> HubSettings {
        HubSettings {
            heartbeat_interval: Duration::from_secs(self.heartbeat_interval_secs),
            send_timeout: Duration::from_millis(self.send_timeout_ms),
            outbox_capacity: self.outbox_capacity,
        }
    }

    /// Validate hub configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(1..=300).contains(&self.heartbeat_interval_secs) {
            return Err(ConfigValidationError::InvalidHeartbeatInterval);
        }
        if self.send_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidSendTimeout);
        }
        if self.outbox_capacity == 0 {
            return Err(ConfigValidationError::InvalidOutboxCapacity);
        }
        Ok(())
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_secs: default_heartbeat_interval(),
            send_timeout_ms: default_send_timeout(),
            outbox_capacity: default_outbox_capacity(),
        }
    }
}

fn default_heartbeat_interval() -> u64 {
    25
}

fn default_send_timeout() -> u64 {
    2000
}

fn default_outbox_capacity() -> usize {
    64
}
