use rand::Rng;
use tracing::debug;

use crate::connectivity::recompute_power_state;
use crate::grid::Grid;
use crate::rotation::rotate;

/// Turns every piece of a generated [`Grid`] by a random number of quarter turns, once per cell.
///
/// Rotation keeps each piece's shape, so the puzzle stays solvable.
pub struct Scrambler<'a, R>
where
    R: Rng + ?Sized,
{
    grid: &'a mut Grid,
    rng: &'a mut R,
}

impl<'a, R> Scrambler<'a, R>
where
    R: Rng + ?Sized,
{
    /// Drive scrambling of `grid`, drawing turns from `rng`.
    pub fn new(grid: &'a mut Grid, rng: &'a mut R) -> Self {
        Self { grid, rng }
    }

    /// Rotate one random cell that has not been scrambled yet by 0 to 3 quarter turns.
    ///
    /// Cells drawn that were already scrambled are redrawn. Returns `false` once every cell is randomized.
    pub fn step(&mut self) -> bool {
        if self.grid.is_randomized() {
            return false;
        }

        let position = loop {
            let candidate = self.grid.position_of_index(self.rng.random_range(0..self.grid.len()));
            if self.grid.cell_at(candidate).is_some_and(|cell| !cell.is_randomized()) {
                break candidate;
            }
        };

        for _ in 0..self.rng.random_range(0..4) {
            rotate(self.grid, position);
        }
        if let Some(cell) = self.grid.cell_at_mut(position) {
            cell.randomized = true;
        }
        recompute_power_state(self.grid);

        if self.grid.is_randomized() {
            debug!(powered = self.grid.powered_count(), cells = self.grid.len(), "scrambling finished");
        }
        true
    }

    /// Call [`Self::step`] until every cell is randomized.
    pub fn run_to_completion(&mut self) {
        while self.step() {}
    }
}
