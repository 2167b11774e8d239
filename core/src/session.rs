use alloc::boxed::Box;
use rand::prelude::*;

use crate::*;

/// Change notification invoked with the post-operation snapshot.
pub type Observer = Box<dyn FnMut(&MineField)>;

/// The public surface of the engine.
///
/// Owns the [`MineField`] exclusively and serializes every mutation through
/// `reset`, `open`, `flag` and `chord`; callers only ever see the field as an
/// immutable snapshot. After each mutating call the registered observer is
/// invoked exactly once, which is the sole channel a UI needs to follow game
/// progress. Operations arriving after the game finished return the snapshot
/// untouched and do not notify.
pub struct Session {
    field: MineField,
    rng: SmallRng,
    observer: Option<Observer>,
}

impl Session {
    /// Creates a session dealing its first board from `config`.
    ///
    /// The seed fixes the whole sequence of boards this session will deal,
    /// one placement seed per reset.
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let field = Self::deal(config, &mut rng)?;
        Ok(Self {
            field,
            rng,
            observer: None,
        })
    }

    /// Wraps an existing field, e.g. one built from an explicit layout.
    pub fn with_field(field: MineField, seed: u64) -> Self {
        Self {
            field,
            rng: SmallRng::seed_from_u64(seed),
            observer: None,
        }
    }

    fn deal(config: FieldConfig, rng: &mut SmallRng) -> Result<MineField> {
        let seed: u64 = rng.random();
        let mut placer = RandomPlacer::from_seed(seed);
        MineField::with_placer(config, &mut placer)
    }

    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.field);
        }
    }

    /// Replaces the field wholesale; a failed reset keeps the previous field.
    pub fn reset(&mut self, rows: Coord, cols: Coord, mines: CellCount) -> Result<&MineField> {
        let config = FieldConfig::new(rows, cols, mines);
        self.field = Self::deal(config, &mut self.rng)?;
        self.notify();
        Ok(&self.field)
    }

    pub fn open(&mut self, row: Coord, col: Coord) -> Result<&MineField> {
        if self.field.is_finished() {
            return Ok(&self.field);
        }
        self.field.open((row, col))?;
        self.notify();
        Ok(&self.field)
    }

    pub fn flag(&mut self, row: Coord, col: Coord) -> Result<&MineField> {
        if self.field.is_finished() {
            return Ok(&self.field);
        }
        self.field.flag((row, col))?;
        self.notify();
        Ok(&self.field)
    }

    pub fn chord(&mut self, row: Coord, col: Coord) -> Result<&MineField> {
        if self.field.is_finished() {
            return Ok(&self.field);
        }
        self.field.chord((row, col))?;
        self.notify();
        Ok(&self.field)
    }
}
