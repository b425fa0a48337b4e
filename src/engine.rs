use std::num::NonZero;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::cell::CellId;
use crate::error::EngineError;
use crate::generator::Generator;
use crate::grid::Grid;
use crate::rotation::rotate;
use crate::scrambler::Scrambler;
use crate::vector::{Dimension, Vector2};

/// Where a puzzle is in its life cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// The spanning tree is still being grown.
    Generating,
    /// Pieces are still being turned at random.
    Scrambling,
    /// The puzzle is ready for the player.
    Playing,
}

/// Owns a [`Grid`] and the random source that shapes it; the only way to mutate a puzzle.
///
/// A presentation layer reads the grid through [`Self::grid`] and sends rotations by [`CellId`].
pub struct PuzzleEngine<R = StdRng>
where
    R: Rng,
{
    grid: Grid,
    rng: R,
}

impl PuzzleEngine<StdRng> {
    /// Generate and scramble a `rows` by `columns` puzzle from OS entropy.
    ///
    /// Use a [`PuzzleBuilder`](crate::PuzzleBuilder) for a seeded or unscrambled puzzle.
    pub fn new(rows: usize, columns: usize) -> Result<Self, EngineError> {
        crate::PuzzleBuilder::with_dims(rows, columns).build()
    }
}

impl<R> PuzzleEngine<R>
where
    R: Rng,
{
    /// An engine holding an empty grid, to be driven with [`Self::step`].
    pub fn blank(rows: usize, columns: usize, rng: R) -> Result<Self, EngineError> {
        let (rows, columns) = dimensions(rows, columns)?;
        Ok(Self { grid: Grid::create(rows, columns), rng })
    }

    /// Generate and scramble a puzzle drawing every random choice from `rng`.
    pub fn with_rng(rows: usize, columns: usize, rng: R) -> Result<Self, EngineError> {
        let mut engine = Self::blank(rows, columns, rng)?;
        engine.generate()?;
        engine.scramble();
        Ok(engine)
    }

    /// Replace the grid wholesale with a freshly generated and scrambled one, e.g. when the player resizes the puzzle.
    ///
    /// On error the current grid is kept.
    pub fn new_puzzle(&mut self, rows: usize, columns: usize) -> Result<&Grid, EngineError> {
        self.grid = self.fresh_grid(rows, columns)?;
        Ok(&self.grid)
    }

    // built aside; `self.grid` is untouched on failure
    fn fresh_grid(&mut self, rows: usize, columns: usize) -> Result<Grid, EngineError> {
        let (rows, columns) = dimensions(rows, columns)?;
        let mut grid = Grid::create(rows, columns);
        debug!(rows = grid.rows(), columns = grid.columns(), "generating puzzle");
        Generator::new(&mut grid, &mut self.rng).run_to_completion()?;
        Scrambler::new(&mut grid, &mut self.rng).run_to_completion();
        Ok(grid)
    }

    pub(crate) fn generate(&mut self) -> Result<(), EngineError> {
        debug!(rows = self.grid.rows(), columns = self.grid.columns(), "generating puzzle");
        Generator::new(&mut self.grid, &mut self.rng).run_to_completion()
    }

    pub(crate) fn scramble(&mut self) {
        Scrambler::new(&mut self.grid, &mut self.rng).run_to_completion()
    }

    /// Advance by a single generation or scramble step and report the phase reached.
    ///
    /// Once playing, this does nothing.
    pub fn step(&mut self) -> Result<Phase, EngineError> {
        if !self.grid.is_ready() {
            Generator::new(&mut self.grid, &mut self.rng).step()?;
        } else if !self.grid.is_randomized() {
            Scrambler::new(&mut self.grid, &mut self.rng).step();
        }

        Ok(self.phase())
    }

    /// The phase reached so far.
    pub fn phase(&self) -> Phase {
        if !self.grid.is_ready() {
            Phase::Generating
        } else if !self.grid.is_randomized() {
            Phase::Scrambling
        } else {
            Phase::Playing
        }
    }

    /// Turn the piece of cell `id` a quarter turn clockwise and return the updated grid.
    pub fn rotate_cell(&mut self, id: CellId) -> Result<&Grid, EngineError> {
        let position = self.grid.find(id).ok_or(EngineError::UnknownCell(id))?.position();
        rotate(&mut self.grid, position);
        Ok(&self.grid)
    }

    /// Like [`Self::rotate_cell`], addressing the cell by position.
    pub fn rotate_at(&mut self, position: Vector2) -> Result<&Grid, EngineError> {
        if !rotate(&mut self.grid, position) {
            return Err(EngineError::OutOfBounds { x: position.x, y: position.y });
        }
        Ok(&self.grid)
    }

    /// Whether every cell is wired to the root.
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Whether generation has finished.
    pub fn is_ready(&self) -> bool {
        self.grid.is_ready()
    }

    /// Whether every piece has been scrambled.
    pub fn is_randomized(&self) -> bool {
        self.grid.is_randomized()
    }

    /// Read-only view of the current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// An owned copy of the current grid.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }
}

pub(crate) fn dimensions(rows: usize, columns: usize) -> Result<(Dimension, Dimension), EngineError> {
    match (NonZero::new(rows), NonZero::new(columns)) {
        (Some(rows), Some(columns)) => Ok((rows, columns)),
        _ => Err(EngineError::InvalidDimensions { rows, columns }),
    }
}
