//! Grid squares and the labels attached to them.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::puzzle::Direction;

/// Style label carried by a cell.
///
/// Rendered as the class names the front end keys on: `white`,
/// `clue-<id>`, `sep-across`, `sep-down`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellLabel {
    /// The cell belongs to at least one answer.
    Filled,
    /// The cell is occupied by the entry (or group member) with this id.
    Clue(String),
    /// A word break follows this cell.
    Separator(Direction),
}

impl CellLabel {
    pub fn clue(id: impl Into<String>) -> Self {
        CellLabel::Clue(id.into())
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellLabel::Filled => f.write_str("white"),
            CellLabel::Clue(id) => write!(f, "clue-{}", id),
            CellLabel::Separator(direction) => write!(f, "sep-{}", direction),
        }
    }
}

impl Serialize for CellLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One grid square.
///
/// A cell with no labels is blocked and never fillable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Clue number shown in the corner; empty unless an entry starts here.
    #[serde(rename = "number")]
    pub display_number: String,
    #[serde(rename = "classes")]
    pub labels: BTreeSet<CellLabel>,
}

impl Cell {
    pub fn is_blocked(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_filled(&self) -> bool {
        self.labels.contains(&CellLabel::Filled)
    }

    pub fn has_label(&self, label: &CellLabel) -> bool {
        self.labels.contains(label)
    }
}
