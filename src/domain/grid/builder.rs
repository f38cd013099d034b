//! Grid construction from clue entries.
//!
//! [`build`] walks every entry over a blank `rows × cols` grid and annotates
//! the cells it touches:
//!
//! ```text
//!   1-across, length 5, separators {",": [3]}
//!
//!   ┌─────┬─────┬─────┬─────┬─────┐
//!   │1    │     │   ,│     │     │   offset 2 carries sep-across
//!   └─────┴─────┴─────┴─────┴─────┘
//! ```
//!
//! The result is independent of entry order except for which entry gets to
//! set a shared start cell's number, and only offset 0 ever sets one.

use serde::Serialize;

use crate::domain::puzzle::{ClueEntry, Dimensions, Direction, Position};

use super::{Cell, CellLabel, GridError};

/// A `rows × cols` array of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    #[serde(skip)]
    dimensions: Dimensions,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// A grid of blocked cells.
    pub fn blank(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![vec![Cell::default(); dimensions.cols]; dimensions.rows],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.row)?.get(position.col)
    }

    fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut(position.row)?.get_mut(position.col)
    }

    /// Row-major view of the cells.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.dimensions.rows && position.col < self.dimensions.cols
    }

    /// Every cell with its position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (Position::new(col, row), cell))
        })
    }
}

/// An entry prepared for a clue listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClueListing {
    #[serde(flatten)]
    pub entry: ClueEntry,
    /// Class names of every cell label this entry highlights.
    pub labels: Vec<String>,
}

impl ClueListing {
    fn from_entry(entry: &ClueEntry) -> Self {
        let labels = entry
            .occupancy_ids()
            .into_iter()
            .map(|id| CellLabel::clue(id).to_string())
            .collect();
        Self {
            entry: entry.clone(),
            labels,
        }
    }
}

/// Output of [`build`]: the annotated grid and the clue lists by direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltGrid {
    pub grid: Grid,
    pub across: Vec<ClueListing>,
    pub down: Vec<ClueListing>,
}

/// Lays `entries` onto a blank grid of `dimensions`.
///
/// # Errors
///
/// Returns [`GridError::EntryOutOfBounds`] when any non-empty entry walks
/// outside the grid. No partially built grid is returned.
pub fn build(dimensions: Dimensions, entries: &[ClueEntry]) -> Result<BuiltGrid, GridError> {
    let mut grid = Grid::blank(dimensions);

    for entry in entries {
        place_entry(&mut grid, entry)?;
    }

    let listings = |direction: Direction| {
        entries
            .iter()
            .filter(|e| e.direction == direction)
            .map(ClueListing::from_entry)
            .collect::<Vec<_>>()
    };

    Ok(BuiltGrid {
        across: listings(Direction::Across),
        down: listings(Direction::Down),
        grid,
    })
}

fn place_entry(grid: &mut Grid, entry: &ClueEntry) -> Result<(), GridError> {
    if entry.length == 0 {
        return Ok(());
    }
    check_bounds(grid, entry)?;

    let occupancy: Vec<CellLabel> = entry
        .occupancy_ids()
        .into_iter()
        .map(CellLabel::clue)
        .collect();
    let separators = entry.separator_offsets().unwrap_or_default();
    let dimensions = grid.dimensions();

    for offset in 0..entry.length {
        let position = entry.cell_at(offset);
        let cell = grid
            .get_mut(position)
            .ok_or_else(|| out_of_bounds(dimensions, entry))?;

        if offset == 0 && cell.display_number.is_empty() {
            cell.display_number = entry.number.to_string();
        }
        cell.labels.insert(CellLabel::Filled);
        cell.labels.extend(occupancy.iter().cloned());

        // Separator offsets are 1-based.
        if separators.contains(&(offset + 1)) {
            cell.labels.insert(CellLabel::Separator(entry.direction));
        }
    }

    Ok(())
}

fn check_bounds(grid: &Grid, entry: &ClueEntry) -> Result<(), GridError> {
    let last = match entry.direction {
        Direction::Across => entry
            .start
            .col
            .checked_add(entry.length - 1)
            .map(|col| Position::new(col, entry.start.row)),
        Direction::Down => entry
            .start
            .row
            .checked_add(entry.length - 1)
            .map(|row| Position::new(entry.start.col, row)),
    };

    match last {
        Some(last) if grid.contains(entry.start) && grid.contains(last) => Ok(()),
        _ => Err(out_of_bounds(grid.dimensions(), entry)),
    }
}

fn out_of_bounds(dimensions: Dimensions, entry: &ClueEntry) -> GridError {
    GridError::EntryOutOfBounds {
        entry_id: entry.id.clone(),
        start: entry.start,
        direction: entry.direction,
        length: entry.length,
        dimensions,
    }
}
