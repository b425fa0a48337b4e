use std::collections::BTreeSet;

use itertools::Itertools;
use strum::{Display, IntoStaticStr, VariantArray};

use crate::vector::Vector2;

/// The directions a cell's piece currently uses, ordered by [`Direction`]'s declaration order.
pub type Connections = BTreeSet<Direction>;

/// Most connections any piece may carry. A four-way cross never appears in a generated puzzle.
pub const MAX_CONNECTIONS: usize = 3;

/// The four compass directions a piece can connect through.
#[derive(Copy, Clone, VariantArray, Display, IntoStaticStr, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// The unit offset of a step in this direction.
    pub const fn offset(&self) -> Vector2 {
        match self {
            Self::Up => Vector2::new(0, -1),
            Self::Down => Vector2::new(0, 1),
            Self::Left => Vector2::new(-1, 0),
            Self::Right => Vector2::new(1, 0),
        }
    }

    /// Step from `position` in this direction. The result may lie outside any grid.
    pub fn attempt_from(&self, position: Vector2) -> Vector2 {
        position + self.offset()
    }

    /// Invert the direction specified by `self`.
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The direction a quarter turn clockwise from `self`.
    pub const fn clockwise(&self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    /// Determine the direction from `a` to `b`.
    ///
    /// Returns [`None`] unless the two positions are orthogonally adjacent.
    pub fn between(a: Vector2, b: Vector2) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}

/// The category of piece drawn in a cell.
///
/// Every shape except [`Root`](PieceShape::Root) follows from the cell's connections; see [`PieceShape::of`].
#[derive(Copy, Clone, Debug, Default, Display, IntoStaticStr, VariantArray, Eq, PartialEq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum PieceShape {
    /// No connections yet.
    #[default]
    Empty,
    /// One connection; a "computer" at a leaf of the network.
    Endpoint,
    /// Two opposite connections.
    Straight,
    /// Two perpendicular connections.
    Corner,
    /// Three connections.
    Tee,
    /// The server every other cell must be wired to.
    Root,
}

impl PieceShape {
    /// Derive the non-root shape carrying `connections`.
    pub fn of(connections: &Connections) -> Self {
        match connections.len() {
            0 => Self::Empty,
            1 => Self::Endpoint,
            2 => match connections.iter().collect_tuple() {
                Some((first, second)) if first.opposite() == *second => Self::Straight,
                _ => Self::Corner,
            },
            _ => Self::Tee,
        }
    }
}

/// Turn every connection a quarter turn clockwise, keeping their count.
pub(crate) fn rotate_clockwise(connections: &Connections) -> Connections {
    connections.iter().map(Direction::clockwise).collect()
}

/// The orientation name of a set of connections, read clockwise from the first used direction.
pub(crate) fn orientation_of(connections: &Connections) -> &'static str {
    use Direction::*;

    match connections.iter().copied().collect_vec().as_slice() {
        [] => "",
        [Up] => "up",
        [Down] => "down",
        [Left] => "left",
        [Right] => "right",
        [Up, Right] => "upright",
        [Down, Right] => "rightdown",
        [Down, Left] => "downleft",
        [Up, Left] => "leftup",
        [Up, Down] => "updown",
        [Left, Right] => "leftright",
        [Up, Left, Right] => "leftupright",
        [Up, Down, Right] => "uprightdown",
        [Down, Left, Right] => "rightdownleft",
        [Up, Down, Left] => "downleftup",
        _ => "cross",
    }
}

/// The box-drawing character for a set of connections.
pub(crate) fn glyph_of(connections: &Connections) -> char {
    match orientation_of(connections) {
        "up" => '╵',
        "down" => '╷',
        "left" => '╴',
        "right" => '╶',
        "upright" => '└',
        "rightdown" => '┌',
        "downleft" => '┐',
        "leftup" => '┘',
        "updown" => '│',
        "leftright" => '─',
        "leftupright" => '┴',
        "uprightdown" => '├',
        "rightdownleft" => '┬',
        "downleftup" => '┤',
        "cross" => '┼',
        _ => '·',
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    fn set(directions: &[Direction]) -> Connections {
        directions.iter().copied().collect()
    }

    #[test]
    fn opposite_is_involution() {
        for direction in Direction::VARIANTS {
            assert_ne!(direction.opposite(), *direction);
            assert_eq!(direction.opposite().opposite(), *direction);
        }
    }

    #[test]
    fn between_adjacent_only() {
        let origin = Vector2::new(1, 1);
        assert_eq!(Direction::between(origin, Vector2::new(1, 0)), Some(Direction::Up));
        assert_eq!(Direction::between(origin, Vector2::new(2, 1)), Some(Direction::Right));
        assert_eq!(Direction::between(origin, Vector2::new(2, 2)), None);
        assert_eq!(Direction::between(origin, Vector2::new(3, 1)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn shapes_from_connections() {
        assert_eq!(PieceShape::of(&set(&[])), PieceShape::Empty);
        assert_eq!(PieceShape::of(&set(&[Direction::Left])), PieceShape::Endpoint);
        assert_eq!(PieceShape::of(&set(&[Direction::Left, Direction::Right])), PieceShape::Straight);
        assert_eq!(PieceShape::of(&set(&[Direction::Up, Direction::Down])), PieceShape::Straight);
        assert_eq!(PieceShape::of(&set(&[Direction::Up, Direction::Right])), PieceShape::Corner);
        assert_eq!(PieceShape::of(&set(&[Direction::Up, Direction::Left, Direction::Right])), PieceShape::Tee);
    }

    #[test]
    fn rotation_table() {
        assert_eq!(rotate_clockwise(&set(&[Direction::Up, Direction::Right])), set(&[Direction::Right, Direction::Down]));
        assert_eq!(rotate_clockwise(&set(&[Direction::Up, Direction::Down])), set(&[Direction::Left, Direction::Right]));
        assert_eq!(rotate_clockwise(&set(&[Direction::Left])), set(&[Direction::Up]));
        assert_eq!(
            rotate_clockwise(&set(&[Direction::Left, Direction::Up, Direction::Right])),
            set(&[Direction::Up, Direction::Right, Direction::Down])
        );
    }

    #[test]
    fn orientation_names_follow_rotation() {
        let mut connections = set(&[Direction::Left, Direction::Up, Direction::Right]);
        let mut names = Vec::new();
        for _ in 0..4 {
            names.push(orientation_of(&connections));
            connections = rotate_clockwise(&connections);
        }
        assert_eq!(names, ["leftupright", "uprightdown", "rightdownleft", "downleftup"]);
        assert_eq!(glyph_of(&set(&[Direction::Down, Direction::Right])), '┌');
        assert_eq!(glyph_of(&set(&[])), '·');
    }
}
