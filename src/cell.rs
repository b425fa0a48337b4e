use std::fmt::{Display, Formatter};

use crate::shape::{glyph_of, orientation_of, rotate_clockwise, Connections, Direction, PieceShape};
use crate::vector::Vector2;

/// Stable identifier of a cell, unique for the lifetime of the process.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellId(pub(crate) u64);

impl CellId {
    /// The raw identifier, for handing to a presentation layer.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Display for CellId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One grid position holding a rotatable piece.
///
/// Cells are only ever mutated through [`Grid`](crate::Grid) and the engine; callers get shared references.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub(crate) id: CellId,
    pub(crate) position: Vector2,
    pub(crate) connections: Connections,
    pub(crate) shape: PieceShape,
    // no further edges will be added during generation
    pub(crate) configured: bool,
    // rotated once by the scrambler
    pub(crate) randomized: bool,
    pub(crate) powered: bool,
}

impl Cell {
    pub(crate) fn new(id: CellId, position: Vector2) -> Self {
        Self {
            id,
            position,
            connections: Connections::new(),
            shape: PieceShape::Empty,
            configured: false,
            randomized: false,
            powered: false,
        }
    }

    /// This cell's identifier.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Where the cell sits in its grid.
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// The directions the piece uses under its current rotation.
    pub fn connections(&self) -> &Connections {
        &self.connections
    }

    /// The piece category, fixed once generation ends.
    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    /// Whether generation will add no further edges to this cell.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Whether the scrambler has visited this cell.
    pub fn is_randomized(&self) -> bool {
        self.randomized
    }

    /// Whether this cell is wired to the root under the current rotations.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Whether this is the server cell.
    pub fn is_root(&self) -> bool {
        self.shape == PieceShape::Root
    }

    /// Whether the piece uses `direction`.
    pub fn connects(&self, direction: Direction) -> bool {
        self.connections.contains(&direction)
    }

    /// The orientation name of the piece, e.g. `upright` or `leftupright`; empty for a cell without connections.
    pub fn orientation(&self) -> &'static str {
        orientation_of(&self.connections)
    }

    /// Add `direction` and re-derive the shape. The root keeps its shape.
    pub(crate) fn connect(&mut self, direction: Direction) {
        self.connections.insert(direction);
        if !self.is_root() {
            self.shape = PieceShape::of(&self.connections);
        }
    }

    /// Turn the piece a quarter turn clockwise. The shape never changes.
    pub(crate) fn rotate(&mut self) {
        self.connections = rotate_clockwise(&self.connections);
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", glyph_of(&self.connections))
    }
}
