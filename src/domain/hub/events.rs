//! Events exchanged between the hub and its connections.

use crate::domain::foundation::ValidationError;

/// What happened to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// A letter was typed into the cell.
    Letter(char),
    /// The cell was cleared.
    Clear,
}

/// One participant's change to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: usize,
    pub col: usize,
    pub key: EditKey,
    /// Clue label the participant was working in, if any.
    pub clue: Option<String>,
}

impl CellEdit {
    /// A letter typed at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns a validation error if `letter` is not alphabetic.
    pub fn letter(row: usize, col: usize, letter: char) -> Result<Self, ValidationError> {
        if !letter.is_alphabetic() {
            return Err(ValidationError::invalid_format(
                "key",
                format!("'{}' is not a letter", letter.escape_debug()),
            ));
        }
        Ok(Self {
            row,
            col,
            key: EditKey::Letter(letter),
            clue: None,
        })
    }

    /// The cell at (`row`, `col`) was cleared.
    pub fn clear(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            key: EditKey::Clear,
            clue: None,
        }
    }

    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clue = Some(clue.into());
        self
    }
}

/// Everything the hub can push to a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubEvent {
    /// Another participant edited a cell.
    Edit(CellEdit),
    /// Membership changed; `connected` is the current live count.
    Presence { connected: usize },
    /// Liveness probe, no payload.
    Heartbeat,
}

impl HubEvent {
    /// Short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            HubEvent::Edit(_) => "edit",
            HubEvent::Presence { .. } => "presence",
            HubEvent::Heartbeat => "heartbeat",
        }
    }
}
