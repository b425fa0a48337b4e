//! Which cells are wired to which, under the pieces' current rotations.
//!
//! Two adjacent cells are linked when the first uses the direction leading to the second
//! and the second uses the opposite one. Every walk here is an explicit depth-first search
//! over positions with a visited set.

use std::collections::HashSet;

use itertools::Itertools;

use crate::grid::Grid;
use crate::shape::Direction;
use crate::vector::Vector2;

/// Whether the cells at `a` and `b` are orthogonally adjacent and their pieces meet.
pub fn linked(grid: &Grid, a: Vector2, b: Vector2) -> bool {
    let Some(direction) = Direction::between(a, b) else {
        return false;
    };

    match (grid.cell_at(a), grid.cell_at(b)) {
        (Some(from), Some(to)) => from.connects(direction) && to.connects(direction.opposite()),
        _ => false,
    }
}

/// The neighbors linked to `position`, skipping the one reached through `except`.
pub fn connected_neighbors(grid: &Grid, position: Vector2, except: Option<Direction>) -> Vec<Vector2> {
    grid.neighbor_positions(position)
        .filter(|(direction, _)| Some(*direction) != except)
        .filter(|(_, neighbor)| linked(grid, position, *neighbor))
        .map(|(_, neighbor)| neighbor)
        .collect_vec()
}

/// Every cell reachable from `root` through links, `root` included.
pub fn reachable_from(grid: &Grid, root: Vector2) -> HashSet<Vector2> {
    let mut visited = HashSet::with_capacity(grid.len());
    if grid.cell_at(root).is_none() {
        return visited;
    }

    let mut stack = vec![root];
    visited.insert(root);
    while let Some(position) = stack.pop() {
        for neighbor in connected_neighbors(grid, position, None) {
            if visited.insert(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    visited
}

/// Whether `b` can be reached from `a` without using the direct link between them.
///
/// Used before joining two cells: if this holds, the new edge would close a cycle.
pub fn is_indirectly_connected(grid: &Grid, a: Vector2, b: Vector2) -> bool {
    if a == b {
        return true;
    }

    let direct = Direction::between(a, b);
    let mut visited = HashSet::from([a]);
    let mut stack = connected_neighbors(grid, a, direct);
    visited.extend(stack.iter().copied());

    while let Some(position) = stack.pop() {
        if position == b {
            return true;
        }

        for neighbor in connected_neighbors(grid, position, None) {
            if visited.insert(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    false
}

/// Power the root and every cell reachable from it; unpower the rest.
pub fn recompute_power_state(grid: &mut Grid) {
    let powered = match grid.root() {
        Some(root) => reachable_from(grid, root.position()),
        None => HashSet::new(),
    };

    for cell in grid.all_cells_mut() {
        cell.powered = powered.contains(&cell.position);
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::*;
    use crate::tests::link;

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::create(NonZero::new(rows).unwrap(), NonZero::new(columns).unwrap())
    }

    #[test]
    fn linked_requires_both_sides() {
        let mut grid = grid(1, 3);
        let (left, middle, right) = (Vector2::new(0, 0), Vector2::new(1, 0), Vector2::new(2, 0));

        grid.cell_at_mut(left).unwrap().connect(Direction::Right);
        assert!(!linked(&grid, left, middle));

        grid.cell_at_mut(middle).unwrap().connect(Direction::Left);
        assert!(linked(&grid, left, middle));
        assert!(linked(&grid, middle, left));

        // pointing towards each other is not enough if they are not adjacent
        grid.cell_at_mut(right).unwrap().connect(Direction::Left);
        assert!(!linked(&grid, left, right));
        assert!(!linked(&grid, middle, right));
    }

    #[test]
    fn diagonal_never_linked() {
        let mut grid = grid(2, 2);
        for cell in grid.all_cells_mut() {
            for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
                cell.connect(direction);
            }
        }
        assert!(!linked(&grid, Vector2::new(0, 0), Vector2::new(1, 1)));
        assert!(linked(&grid, Vector2::new(0, 0), Vector2::new(1, 0)));
    }

    #[test]
    fn neighbors_except_direction() {
        let mut grid = grid(1, 3);
        link(&mut grid, Vector2::new(0, 0), Vector2::new(1, 0));
        link(&mut grid, Vector2::new(1, 0), Vector2::new(2, 0));

        let middle = Vector2::new(1, 0);
        assert_eq!(connected_neighbors(&grid, middle, None), [Vector2::new(0, 0), Vector2::new(2, 0)]);
        assert_eq!(connected_neighbors(&grid, middle, Some(Direction::Left)), [Vector2::new(2, 0)]);
    }

    #[test]
    fn reachable_stops_at_mismatch() {
        let mut grid = grid(2, 2);
        link(&mut grid, Vector2::new(0, 0), Vector2::new(1, 0));
        link(&mut grid, Vector2::new(1, 0), Vector2::new(1, 1));
        // dangling: points at (0, 0) but (0, 0) does not point back
        grid.cell_at_mut(Vector2::new(0, 1)).unwrap().connect(Direction::Up);

        let reached = reachable_from(&grid, Vector2::new(0, 0));
        assert_eq!(reached, HashSet::from([Vector2::new(0, 0), Vector2::new(1, 0), Vector2::new(1, 1)]));
    }

    #[test]
    fn reachable_survives_cycle() {
        let mut grid = grid(2, 2);
        link(&mut grid, Vector2::new(0, 0), Vector2::new(1, 0));
        link(&mut grid, Vector2::new(1, 0), Vector2::new(1, 1));
        link(&mut grid, Vector2::new(1, 1), Vector2::new(0, 1));
        link(&mut grid, Vector2::new(0, 1), Vector2::new(0, 0));

        assert_eq!(reachable_from(&grid, Vector2::new(1, 1)).len(), 4);
    }

    #[test]
    fn indirect_connection_ignores_direct_link() {
        let mut grid = grid(2, 2);
        link(&mut grid, Vector2::new(0, 0), Vector2::new(1, 0));
        link(&mut grid, Vector2::new(1, 0), Vector2::new(1, 1));

        // the direct link alone does not count
        assert!(!is_indirectly_connected(&grid, Vector2::new(0, 0), Vector2::new(1, 0)));
        // joining (0, 0) and (1, 1) through (0, 1) would need (0, 1) in the tree
        assert!(!is_indirectly_connected(&grid, Vector2::new(0, 0), Vector2::new(0, 1)));

        link(&mut grid, Vector2::new(1, 1), Vector2::new(0, 1));
        // now (0, 0) - (0, 1) would close the square
        assert!(is_indirectly_connected(&grid, Vector2::new(0, 0), Vector2::new(0, 1)));
        assert!(is_indirectly_connected(&grid, Vector2::new(0, 1), Vector2::new(0, 0)));
    }

    #[test]
    fn power_follows_root() {
        let mut grid = grid(1, 3);
        link(&mut grid, Vector2::new(0, 0), Vector2::new(1, 0));
        recompute_power_state(&mut grid);
        // no root yet
        assert_eq!(grid.powered_count(), 0);

        grid.set_root(Vector2::new(1, 0));
        recompute_power_state(&mut grid);
        let first = grid.all_cells().map(|cell| cell.is_powered()).collect_vec();
        assert_eq!(first, [true, true, false]);

        recompute_power_state(&mut grid);
        assert_eq!(grid.all_cells().map(|cell| cell.is_powered()).collect_vec(), first);
    }
}
