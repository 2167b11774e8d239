use crate::*;
pub use random::*;

mod random;

/// Strategy for choosing which cells of a fresh grid hide mines.
///
/// Placement runs eagerly when a field is built; it knows nothing about where
/// the player will click first.
pub trait MinePlacer {
    /// Marks `mines` distinct cells of `grid` as mines.
    fn place(&mut self, grid: &mut Grid, mines: CellCount) -> Result<()>;
}

/// Stores every cell's Moore-neighborhood mine count, mine cells included.
pub(crate) fn fill_adjacency(grid: &mut Grid) {
    for pos in grid.positions() {
        let count: u8 = grid
            .neighbors(pos)
            .filter(|&neighbor| grid.is_mine(neighbor))
            .count()
            .try_into()
            .unwrap();
        grid.set_adjacent_mines(pos, count);
    }
}
