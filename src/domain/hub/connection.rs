//! A single registered participant and its lifecycle.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::{self, error::SendTimeoutError};

use crate::domain::foundation::{ConnectionId, StateMachine};

use super::HubEvent;

/// Lifecycle of one connection.
///
/// ```text
/// Connecting ──► Open ──► Closing ──► Closed
///      └────────────────────────────────▲
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

impl StateMachine for ConnectionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConnectionState::*;
        matches!(
            (self, target),
            (Connecting, Open) | (Connecting, Closed) | (Open, Closing) | (Closing, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConnectionState::*;
        match self {
            Connecting => vec![Open, Closed],
            Open => vec![Closing],
            Closing => vec![Closed],
            Closed => vec![],
        }
    }
}

/// Why an event could not be handed to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("connection {0} is closed")]
    Closed(ConnectionId),

    #[error("connection {id} did not accept an event within {timeout:?}")]
    TimedOut { id: ConnectionId, timeout: Duration },
}

/// Registry entry: the id plus the sending half of the connection's outbox.
///
/// Cloning is cheap; snapshots hand out clones so delivery happens without
/// holding the registry lock.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    outbox: mpsc::Sender<HubEvent>,
}

impl Connection {
    pub(crate) fn new(id: ConnectionId, outbox: mpsc::Sender<HubEvent>) -> Self {
        Self { id, outbox }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues `event` for this connection, waiting at most `timeout` for room.
    pub async fn deliver(&self, event: HubEvent, timeout: Duration) -> Result<(), DeliveryError> {
        match self.outbox.send_timeout(event, timeout).await {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Closed(_)) => Err(DeliveryError::Closed(self.id)),
            Err(SendTimeoutError::Timeout(_)) => Err(DeliveryError::TimedOut {
                id: self.id,
                timeout,
            }),
        }
    }
}
