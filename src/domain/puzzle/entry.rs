//! Clue entries: one answer slot each.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Direction, Position};

/// Separator glyphs the grid knows how to draw.
pub const RECOGNISED_SEPARATORS: [&str; 2] = [",", "-"];

/// One answer slot in a puzzle.
///
/// Entries are immutable once read from a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueEntry {
    /// Unique id, e.g. `1-across`.
    pub id: String,
    /// Display number; shared by entries starting at the same cell.
    pub number: u32,
    pub length: usize,
    pub direction: Direction,
    pub start: Position,
    pub clue: String,
    /// Separator glyph → 1-based offsets within the answer.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub separators: BTreeMap<String, Vec<usize>>,
    /// Ids of every entry sharing this answer, when clues are linked.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<String>,
}

impl ClueEntry {
    pub fn new(
        id: impl Into<String>,
        number: u32,
        length: usize,
        direction: Direction,
        start: Position,
        clue: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            number,
            length,
            direction,
            start,
            clue: clue.into(),
            separators: BTreeMap::new(),
            group: Vec::new(),
        }
    }

    pub fn with_separator(mut self, glyph: impl Into<String>, offsets: Vec<usize>) -> Self {
        self.separators.insert(glyph.into(), offsets);
        self
    }

    pub fn with_group<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group = members.into_iter().map(Into::into).collect();
        self
    }

    /// Offsets of the first recognised separator glyph, in key order.
    ///
    /// Only one separator convention is expected per entry; unknown glyphs
    /// are ignored.
    pub fn separator_offsets(&self) -> Option<&[usize]> {
        self.separators
            .iter()
            .find(|(glyph, _)| RECOGNISED_SEPARATORS.contains(&glyph.as_str()))
            .map(|(_, offsets)| offsets.as_slice())
    }

    /// Ids whose occupancy label this entry contributes to its cells.
    pub fn occupancy_ids(&self) -> Vec<&str> {
        if self.group.is_empty() {
            vec![self.id.as_str()]
        } else {
            self.group.iter().map(String::as_str).collect()
        }
    }

    /// Cell at `offset` along the walk.
    pub fn cell_at(&self, offset: usize) -> Position {
        self.start.step(self.direction, offset)
    }
}
