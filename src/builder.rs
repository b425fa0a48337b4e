//! Configuration of a new puzzle.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{dimensions, PuzzleEngine};
use crate::error::EngineError;

/// Configuration for a new puzzle, turned into a [`PuzzleEngine`] by [`Self::build`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    // rows, columns
    dims: (usize, usize),
    seed: Option<u64>,
    scramble: bool,
    incremental: bool,
    invalid_reasons: Vec<EngineError>,
}

impl Default for PuzzleBuilder {
    fn default() -> Self {
        Self::with_dims(3, 5)
    }
}

impl PuzzleBuilder {
    /// Construct a new [`Self`] for a grid of `rows` by `columns` cells.
    ///
    /// Zero in either dimension puts the builder in an invalid state.
    pub fn with_dims(rows: usize, columns: usize) -> Self {
        let mut invalid_reasons = Vec::new();
        if let Err(reason) = dimensions(rows, columns) {
            invalid_reasons.push(reason);
        }

        Self {
            dims: (rows, columns),
            seed: None,
            scramble: true,
            incremental: false,
            invalid_reasons,
        }
    }

    /// Draw every random choice from a generator seeded with `seed`, making the puzzle reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Whether to scramble the pieces after generation. Defaults to `true`; without it the puzzle starts solved.
    pub fn scramble(&mut self, scramble: bool) -> &mut Self {
        self.scramble = scramble;
        self
    }

    /// Hand back an empty grid, leaving generation and scrambling to [`PuzzleEngine::step`].
    pub fn incremental(&mut self, incremental: bool) -> &mut Self {
        self.incremental = incremental;
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<EngineError>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<EngineError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Create the engine and, unless incremental, generate (and optionally scramble) its puzzle.
    pub fn build(&self) -> Result<PuzzleEngine<StdRng>, EngineError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut engine = PuzzleEngine::blank(self.dims.0, self.dims.1, rng)?;
        if self.incremental {
            return Ok(engine);
        }

        engine.generate()?;
        if self.scramble {
            engine.scramble();
        }

        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;

    #[test]
    fn invalid_until_build() {
        let builder = PuzzleBuilder::with_dims(0, 0);
        assert_eq!(builder.is_valid(), Some(&vec![EngineError::InvalidDimensions { rows: 0, columns: 0 }]));
        assert!(builder.build().is_err());
    }

    #[test]
    fn default_dims() {
        let engine = PuzzleBuilder::default().seed(1).build().unwrap();
        assert_eq!((engine.grid().rows(), engine.grid().columns()), (3, 5));
    }

    #[test]
    fn unscrambled_starts_solved() {
        let engine = PuzzleBuilder::with_dims(5, 4).seed(9).scramble(false).build().unwrap();
        assert_eq!(engine.phase(), Phase::Scrambling);
        assert!(engine.is_solved());
    }

    #[test]
    fn incremental_starts_blank() {
        let engine = PuzzleBuilder::with_dims(2, 2).incremental(true).build().unwrap();
        assert_eq!(engine.phase(), Phase::Generating);
        assert!(engine.grid().all_cells().all(|cell| cell.connections().is_empty()));
    }
}
