//! The JSON document embedded in a Guardian crossword page.
//!
//! Only the fields the grid needs are decoded; everything else in the payload
//! (solutions, creator, dates) is ignored.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::puzzle::{ClueEntry, Dimensions, Direction, Position, PuzzleDocument};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrosswordPayload {
    #[serde(default)]
    id: String,
    name: String,
    dimensions: Dimensions,
    entries: Vec<EntryPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryPayload {
    id: String,
    number: u32,
    length: usize,
    direction: Direction,
    #[serde(default)]
    clue: String,
    position: PointPayload,
    #[serde(default)]
    separator_locations: BTreeMap<String, Vec<usize>>,
    #[serde(default)]
    group: Vec<String>,
}

/// `x` is the column, `y` the row.
#[derive(Debug, Deserialize)]
struct PointPayload {
    x: usize,
    y: usize,
}

impl From<EntryPayload> for ClueEntry {
    fn from(payload: EntryPayload) -> Self {
        let mut entry = ClueEntry::new(
            payload.id,
            payload.number,
            payload.length,
            payload.direction,
            Position::new(payload.position.x, payload.position.y),
            payload.clue,
        );
        entry.separators = payload.separator_locations;
        entry.group = payload.group;
        entry
    }
}

/// Decodes a crossword payload into a [`PuzzleDocument`].
pub fn parse_crossword_json(json: &str) -> Result<PuzzleDocument, serde_json::Error> {
    let payload: CrosswordPayload = serde_json::from_str(json)?;
    Ok(PuzzleDocument {
        id: payload.id,
        name: payload.name,
        dimensions: payload.dimensions,
        entries: payload.entries.into_iter().map(ClueEntry::from).collect(),
    })
}
