use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Static per-cell facts, written once by placement and immutable afterwards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
}

/// Player-visible status of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Closed,
    Opened,
    Flagged,
}

impl CellStatus {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Opened)
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Closed
    }
}

/// Rectangular cell storage: an array of static facts and a parallel array of
/// statuses, both addressed by `(row, col)`.
///
/// Reads and writes through the public surface are bounds-checked; positions
/// outside the grid fail with [`FieldError::OutOfBounds`], never clamped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    states: Array2<CellStatus>,
}

impl Grid {
    pub fn new(rows: Coord, cols: Coord) -> Self {
        let dim = [usize::from(rows), usize::from(cols)];
        Self {
            cells: Array2::default(dim),
            states: Array2::default(dim),
        }
    }

    pub fn size(&self) -> Pos {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn count_mines(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn validate(&self, pos: Pos) -> Result<Pos> {
        let (rows, cols) = self.size();
        if pos.0 < rows && pos.1 < cols {
            Ok(pos)
        } else {
            Err(FieldError::OutOfBounds)
        }
    }

    pub fn cell(&self, pos: Pos) -> Result<Cell> {
        self.validate(pos).map(|pos| self.cells[pos.as_index()])
    }

    pub fn status(&self, pos: Pos) -> Result<CellStatus> {
        self.validate(pos).map(|pos| self.states[pos.as_index()])
    }

    /// Marks a mine cell; the placement pass is the only intended writer.
    pub fn set_mine(&mut self, pos: Pos) -> Result<()> {
        let pos = self.validate(pos)?;
        self.cells[pos.as_index()].is_mine = true;
        Ok(())
    }

    pub fn neighbors(&self, pos: Pos) -> NeighborIter {
        NeighborIter::new(pos, self.size())
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn statuses(&self) -> &Array2<CellStatus> {
        &self.states
    }

    pub(crate) fn cell_at(&self, pos: Pos) -> Cell {
        self.cells[pos.as_index()]
    }

    pub(crate) fn status_at(&self, pos: Pos) -> CellStatus {
        self.states[pos.as_index()]
    }

    pub(crate) fn set_status(&mut self, pos: Pos, status: CellStatus) {
        self.states[pos.as_index()] = status;
    }

    pub(crate) fn is_mine(&self, pos: Pos) -> bool {
        self.cells[pos.as_index()].is_mine
    }

    pub(crate) fn set_adjacent_mines(&mut self, pos: Pos, count: u8) {
        self.cells[pos.as_index()].adjacent_mines = count;
    }
}
