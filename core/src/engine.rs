use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Game lifecycle.
///
/// Valid transitions:
/// - Ready -> Playing (first safe reveal)
/// - Ready -> Lost (first reveal hits a mine)
/// - Playing -> Won | Lost
///
/// `Won` and `Lost` are absorbing; only a reset produces a fresh `Ready` field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// The minefield aggregate: cell storage plus the counters and lifecycle
/// state derived from reveals.
///
/// All mutation goes through [`open`](Self::open), [`flag`](Self::flag) and
/// [`chord`](Self::chord); a finished field ignores all three.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    grid: Grid,
    mine_count: CellCount,
    opened_count: Saturating<CellCount>,
    flag_count: Saturating<CellCount>,
    exploded: Option<Pos>,
    state: GameState,
}

impl MineField {
    /// Builds a field by running `placer` over a freshly allocated grid.
    pub fn with_placer<P: MinePlacer>(config: FieldConfig, placer: &mut P) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.rows, config.cols);
        placer.place(&mut grid, config.mines)?;
        crate::placer::fill_adjacency(&mut grid);
        Ok(Self::from_parts(grid))
    }

    /// Builds a field from an explicit mine layout.
    ///
    /// Duplicate positions collapse into one mine; the resulting layout must
    /// still leave at least one safe cell.
    pub fn with_mines(size: Pos, mine_positions: &[Pos]) -> Result<Self> {
        let mut grid = Grid::new(size.0, size.1);
        for &pos in mine_positions {
            grid.set_mine(pos)?;
        }
        FieldConfig::new(size.0, size.1, grid.count_mines()).validate()?;
        crate::placer::fill_adjacency(&mut grid);
        Ok(Self::from_parts(grid))
    }

    fn from_parts(grid: Grid) -> Self {
        let mine_count = grid.count_mines();
        Self {
            grid,
            mine_count,
            opened_count: Saturating(0),
            flag_count: Saturating(0),
            exploded: None,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Pos {
        self.grid.size()
    }

    pub fn row_count(&self) -> Coord {
        self.grid.rows()
    }

    pub fn column_count(&self) -> Coord {
        self.grid.cols()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.grid.total_cells()
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Opened safe cells; an opened mine is terminal and never counted here.
    pub fn opened_count(&self) -> CellCount {
        self.opened_count.0
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count.0
    }

    pub fn closed_count(&self) -> CellCount {
        self.total_cells() - self.opened_count.0 - self.flag_count.0
    }

    pub fn is_mine_opened(&self) -> bool {
        self.exploded.is_some()
    }

    /// The mine that ended the game, if one was opened.
    pub fn exploded_at(&self) -> Option<Pos> {
        self.exploded
    }

    /// How many mines have not been flagged yet; negative when over-flagged.
    pub fn mines_remaining(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count.0 as isize)
    }

    pub fn config(&self) -> FieldConfig {
        let (rows, cols) = self.size();
        FieldConfig::new(rows, cols, self.mine_count)
    }

    pub fn cell(&self, pos: Pos) -> Result<Cell> {
        self.grid.cell(pos)
    }

    pub fn status(&self, pos: Pos) -> Result<CellStatus> {
        self.grid.status(pos)
    }

    pub fn cells(&self) -> &Array2<Cell> {
        self.grid.cells()
    }

    pub fn statuses(&self) -> &Array2<CellStatus> {
        self.grid.statuses()
    }

    /// Opens a closed cell, flood-filling from zero-adjacency cells.
    ///
    /// Opened and flagged targets are left alone; a mine target ends the game
    /// with only that one cell revealed.
    pub fn open(&mut self, pos: Pos) -> Result<OpenOutcome> {
        let pos = self.grid.validate(pos)?;

        if self.state.is_finished() {
            return Ok(OpenOutcome::NoChange);
        }

        Ok(self.open_cell(pos))
    }

    /// Toggles `Closed <-> Flagged`; never reveals, never changes the state.
    pub fn flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        use CellStatus::*;
        use FlagOutcome::*;

        let pos = self.grid.validate(pos)?;

        if self.state.is_finished() {
            return Ok(NoChange);
        }

        Ok(match self.grid.status_at(pos) {
            Closed => {
                self.grid.set_status(pos, Flagged);
                self.flag_count += 1;
                Toggled
            }
            Flagged => {
                self.grid.set_status(pos, Closed);
                self.flag_count -= 1;
                Toggled
            }
            Opened => NoChange,
        })
    }

    /// Opens all closed neighbors of an opened numbered cell, but only when
    /// the flagged-neighbor count equals the cell's number exactly.
    ///
    /// Over- or under-flagged chords do nothing. A misplaced flag can make a
    /// chord open an unflagged mine and lose the game; the neighbor sweep
    /// stops as soon as the field reaches a terminal state.
    pub fn chord(&mut self, pos: Pos) -> Result<OpenOutcome> {
        let pos = self.grid.validate(pos)?;

        if self.state.is_finished() {
            return Ok(OpenOutcome::NoChange);
        }

        let cell = self.grid.cell_at(pos);
        if !self.grid.status_at(pos).is_opened() || cell.adjacent_mines == 0 {
            return Ok(OpenOutcome::NoChange);
        }
        if self.count_flagged_neighbors(pos) != cell.adjacent_mines {
            return Ok(OpenOutcome::NoChange);
        }

        let mut outcome = OpenOutcome::NoChange;
        for neighbor in self.grid.neighbors(pos) {
            outcome = outcome | self.open_cell(neighbor);
            if self.state.is_finished() {
                break;
            }
        }
        Ok(outcome)
    }

    /// Opens a single closed cell and flood-fills when it has no adjacent
    /// mines, then applies the win/loss transition.
    fn open_cell(&mut self, pos: Pos) -> OpenOutcome {
        if !self.grid.status_at(pos).is_closed() {
            return OpenOutcome::NoChange;
        }

        let cell = self.grid.cell_at(pos);
        if cell.is_mine {
            self.grid.set_status(pos, CellStatus::Opened);
            self.exploded = Some(pos);
            self.finish(false);
            log::debug!("mine opened at {:?}", pos);
            return OpenOutcome::Exploded;
        }

        self.grid.set_status(pos, CellStatus::Opened);
        self.opened_count += 1;
        log::debug!("opened {:?}, adjacent mines: {}", pos, cell.adjacent_mines);

        if cell.adjacent_mines == 0 {
            self.flood_from(pos);
        }

        if self.opened_count.0 == self.safe_cells() {
            self.finish(true);
            OpenOutcome::Won
        } else {
            self.start();
            OpenOutcome::Revealed
        }
    }

    /// Iterative work-list traversal; zero-adjacency cells expand, numbered
    /// cells are revealed without expanding, flagged cells are a hard stop.
    fn flood_from(&mut self, start: Pos) {
        let mut visited = BTreeSet::from([start]);
        let mut queue: VecDeque<Pos> = self
            .grid
            .neighbors(start)
            .filter(|&pos| self.grid.status_at(pos).is_closed())
            .collect();
        log::trace!("flood fill from {:?}, frontier: {:?}", start, queue);

        while let Some(pos) = queue.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            if !self.grid.status_at(pos).is_closed() {
                continue;
            }

            let cell = self.grid.cell_at(pos);
            self.grid.set_status(pos, CellStatus::Opened);
            self.opened_count += 1;
            log::trace!("flood opened {:?}, adjacent mines: {}", pos, cell.adjacent_mines);

            if cell.adjacent_mines == 0 {
                queue.extend(
                    self.grid
                        .neighbors(pos)
                        .filter(|&next| self.grid.status_at(next).is_closed())
                        .filter(|next| !visited.contains(next)),
                );
            }
        }
    }

    fn count_flagged_neighbors(&self, pos: Pos) -> u8 {
        self.grid
            .neighbors(pos)
            .filter(|&neighbor| self.grid.status_at(neighbor) == CellStatus::Flagged)
            .count()
            .try_into()
            .unwrap()
    }

    fn start(&mut self) {
        if self.state.is_ready() {
            log::debug!("first reveal, game started");
            self.state = GameState::Playing;
        }
    }

    fn finish(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }
        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("game over: {:?}", self.state);
    }
}
