#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use grid::*;
pub use placer::*;
pub use session::*;
pub use types::*;

mod engine;
mod error;
mod grid;
mod placer;
mod session;
mod types;

/// Board shape and mine total handed to a reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl FieldConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_area(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Rejects empty boards and mine totals that leave no safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(FieldError::InvalidConfiguration);
        }
        if self.mines == 0 || self.mines >= self.total_cells() {
            return Err(FieldError::InvalidConfiguration);
        }
        Ok(())
    }
}

/// 10x10 board with 10 mines.
impl Default for FieldConfig {
    fn default() -> Self {
        Self::new(10, 10, 10)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Toggled => true,
        }
    }
}

/// Outcome of opening one or more cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when a chord opens several cells.
impl BitOr for OpenOutcome {
    type Output = OpenOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use OpenOutcome::*;
        match (self, rhs) {
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation_covers_the_documented_range() {
        assert!(FieldConfig::new(1, 2, 1).validate().is_ok());
        assert!(FieldConfig::new(255, 255, 65_024).validate().is_ok());

        assert_eq!(
            FieldConfig::new(0, 5, 1).validate(),
            Err(FieldError::InvalidConfiguration)
        );
        assert_eq!(
            FieldConfig::new(5, 0, 1).validate(),
            Err(FieldError::InvalidConfiguration)
        );
        assert_eq!(
            FieldConfig::new(5, 5, 0).validate(),
            Err(FieldError::InvalidConfiguration)
        );
        assert_eq!(
            FieldConfig::new(5, 5, 25).validate(),
            Err(FieldError::InvalidConfiguration)
        );
        assert_eq!(
            FieldConfig::new(5, 5, 26).validate(),
            Err(FieldError::InvalidConfiguration)
        );
    }

    #[test]
    fn open_outcomes_merge_by_severity() {
        use OpenOutcome::*;

        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Revealed | Won, Won);
        assert_eq!(Won | Exploded, Exploded);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
        assert!(Exploded.has_update());
    }
}
