use rand::prelude::*;

use super::*;

/// Uniform mine selection without replacement, driven by an explicit seed so
/// layouts are reproducible in tests.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: SmallRng,
}

impl RandomPlacer {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(&mut self, grid: &mut Grid, mines: CellCount) -> Result<()> {
        let mut free = grid.total_cells();
        let mut placed = 0;

        while placed < mines && free > 0 {
            // index into the not-yet-mined cells, row-major
            let mut slot = self.rng.random_range(0..free);
            for pos in grid.positions() {
                if grid.is_mine(pos) {
                    continue;
                }
                if slot == 0 {
                    grid.set_mine(pos)?;
                    placed += 1;
                    free -= 1;
                    break;
                }
                slot -= 1;
            }
        }

        if placed != mines {
            log::warn!("placed {} mines, requested {}", placed, mines);
        }
        Ok(())
    }
}
