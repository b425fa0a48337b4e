use std::num::NonZero;
use std::ops::Add;

use ndarray::Ix;

type Coord = i32;
pub(crate) type Dimension = NonZero<usize>;

/// A point `(x, y)` on a grid, or an offset between two points. The top left cell is at `Vector2 { x: 0, y: 0 }`.
///
/// `x` is the column and `y` is the row.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Vector2 {
    /// Column.
    pub x: Coord,
    /// Row.
    pub y: Coord,
}

impl Vector2 {
    /// Construct a new [`Vector2`] from its column and row.
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    // row, column
    pub(crate) fn as_index(&self) -> Option<(Ix, Ix)> {
        Some((usize::try_from(self.y).ok()?, usize::try_from(self.x).ok()?))
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(Ix, Ix)> for Vector2 {
    fn from(value: (Ix, Ix)) -> Self {
        Self::new(value.1 as Coord, value.0 as Coord)
    }
}

#[cfg(test)]
mod tests {
    use super::Vector2;

    #[test]
    fn add_offsets() {
        assert_eq!(Vector2::new(2, 3) + Vector2::new(-1, 1), Vector2::new(1, 4));
    }

    #[test]
    fn negative_has_no_index() {
        assert_eq!(Vector2::new(-1, 0).as_index(), None);
        assert_eq!(Vector2::new(4, 1).as_index(), Some((1, 4)));
    }
}
