//! Wire messages for the realtime channel.
//!
//! Defines the protocol between server and connected clients, shared by the
//! WebSocket and server-push transports:
//! - Server → Client: welcome, edits from others, presence counts, heartbeats
//! - Client → Server: edits, heartbeats

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::ConnectionId;
use crate::domain::hub::{CellEdit, EditKey, HubEvent};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServerMessage {
    /// First message on every connection; tells the client its own id.
    #[serde(rename_all = "camelCase")]
    Welcome { connection_id: ConnectionId },

    /// Another participant edited a cell.
    Edit(EditPayload),

    /// Current number of connected participants.
    #[serde(rename_all = "camelCase")]
    Presence { connected_count: usize },

    /// Liveness probe; clients may ignore it.
    Heartbeat,
}

impl From<HubEvent> for ServerMessage {
    fn from(event: HubEvent) -> Self {
        match event {
            HubEvent::Edit(edit) => ServerMessage::Edit(edit.into()),
            HubEvent::Presence { connected } => ServerMessage::Presence {
                connected_count: connected,
            },
            HubEvent::Heartbeat => ServerMessage::Heartbeat,
        }
    }
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClientMessage {
    /// The client edited a cell.
    Edit(EditPayload),

    /// Client-side keepalive; accepted and ignored.
    Heartbeat,
}

// ============================================
// Shared Types
// ============================================

/// A cell edit as it appears on the wire.
///
/// `key` is a single letter, or `null` when the cell was cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPayload {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
}

/// Why an inbound edit was not relayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRejected {
    #[error("key must be a single letter, got {0:?}")]
    InvalidKey(String),
}

impl TryFrom<EditPayload> for CellEdit {
    type Error = EditRejected;

    fn try_from(payload: EditPayload) -> Result<Self, Self::Error> {
        let edit = match payload.key {
            None => CellEdit::clear(payload.row, payload.col),
            Some(key) => {
                let mut chars = key.chars();
                let letter = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(EditRejected::InvalidKey(key)),
                };
                CellEdit::letter(payload.row, payload.col, letter)
                    .map_err(|_| EditRejected::InvalidKey(key))?
            }
        };
        Ok(match payload.clue {
            Some(clue) => edit.with_clue(clue),
            None => edit,
        })
    }
}

impl From<CellEdit> for EditPayload {
    fn from(edit: CellEdit) -> Self {
        Self {
            row: edit.row,
            col: edit.col,
            key: match edit.key {
                EditKey::Letter(c) => Some(c.to_string()),
                EditKey::Clear => None,
            },
            clue: edit.clue,
        }
    }
}
