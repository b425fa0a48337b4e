use thiserror::Error;

use crate::cell::CellId;

/// Reasons an engine operation may be refused or fail.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        columns: usize,
    },
    /// No cell with this identifier exists in the current grid.
    #[error("no cell {0} in this puzzle")]
    UnknownCell(CellId),
    /// The position lies outside the current grid.
    #[error("({x}, {y}) is outside the puzzle")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// Generation ran out of cells to extend before wiring every cell.
    /// This should never happen.
    #[error("generation stalled with {remaining} cells left unwired")]
    GenerationStalled {
        /// Cells still without a connection.
        remaining: usize,
    },
}
