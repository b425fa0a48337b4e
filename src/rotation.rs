//! Quarter turns of a single piece.

use tracing::trace;

use crate::connectivity::recompute_power_state;
use crate::grid::Grid;
use crate::vector::Vector2;

/// Turn the piece at `position` a quarter turn clockwise and recompute power across the grid.
///
/// Only which directions the piece uses changes; its connection count and shape stay put.
/// Returns `false`, leaving the grid untouched, if `position` is out of bounds.
pub fn rotate(grid: &mut Grid, position: Vector2) -> bool {
    let Some(cell) = grid.cell_at_mut(position) else {
        return false;
    };

    cell.rotate();
    trace!(x = position.x, y = position.y, orientation = cell.orientation(), "rotated");
    recompute_power_state(grid);
    true
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use strum::VariantArray;

    use super::*;
    use crate::shape::{Direction, PieceShape};
    use crate::tests::link;

    #[test]
    fn order_four_for_every_shape() {
        let mut grid = Grid::create(NonZero::new(3).unwrap(), NonZero::new(3).unwrap());
        let center = Vector2::new(1, 1);
        for arm in [Direction::Up, Direction::Right, Direction::Down] {
            link(&mut grid, center, arm.attempt_from(center));
        }
        link(&mut grid, Vector2::new(0, 0), Vector2::new(0, 1));
        link(&mut grid, Vector2::new(0, 1), Vector2::new(0, 2));
        link(&mut grid, Vector2::new(2, 1), Vector2::new(2, 2));

        let shapes = grid.all_cells().map(|cell| cell.shape()).collect::<Vec<_>>();
        for shape in [PieceShape::Endpoint, PieceShape::Straight, PieceShape::Corner, PieceShape::Tee] {
            assert!(shapes.contains(&shape));
        }

        for cell in grid.clone().all_cells() {
            let before = cell.connections().clone();
            let shape = cell.shape();
            for _ in 0..4 {
                assert!(rotate(&mut grid, cell.position()));
                assert_eq!(grid.cell_at(cell.position()).unwrap().shape(), shape);
                assert_eq!(grid.cell_at(cell.position()).unwrap().connections().len(), before.len());
            }
            assert_eq!(*grid.cell_at(cell.position()).unwrap().connections(), before);
        }
    }

    #[test]
    fn endpoint_cycles_clockwise() {
        let mut grid = Grid::create(NonZero::new(1).unwrap(), NonZero::new(1).unwrap());
        let only = Vector2::new(0, 0);
        grid.cell_at_mut(only).unwrap().connect(Direction::Up);

        let mut seen = Vec::new();
        for _ in Direction::VARIANTS {
            seen.push(grid.cell_at(only).unwrap().orientation());
            rotate(&mut grid, only);
        }
        assert_eq!(seen, ["up", "right", "down", "left"]);
        assert_eq!(grid.cell_at(only).unwrap().shape(), PieceShape::Endpoint);
    }

    #[test]
    fn rotation_recomputes_power() {
        let mut grid = Grid::create(NonZero::new(1).unwrap(), NonZero::new(2).unwrap());
        link(&mut grid, Vector2::new(0, 0), Vector2::new(1, 0));
        grid.set_root(Vector2::new(0, 0));
        recompute_power_state(&mut grid);
        assert!(grid.is_solved());

        rotate(&mut grid, Vector2::new(1, 0));
        assert!(!grid.is_solved());
        assert!(grid.cell_at(Vector2::new(0, 0)).unwrap().is_powered());
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut grid = Grid::create(NonZero::new(1).unwrap(), NonZero::new(1).unwrap());
        assert!(!rotate(&mut grid, Vector2::new(4, 4)));
    }
}
