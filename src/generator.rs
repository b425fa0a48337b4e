use std::collections::HashSet;

use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::cell::Cell;
use crate::connectivity::{connected_neighbors, is_indirectly_connected, recompute_power_state};
use crate::error::EngineError;
use crate::grid::Grid;
use crate::shape::{Direction, MAX_CONNECTIONS};
use crate::vector::Vector2;

/// The outcome of a single [`Generator::step`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GenerationStep {
    /// The grid changed and generation goes on.
    Advanced,
    /// Every cell is wired into the tree.
    Ready,
}

/// Grows a random spanning tree over a [`Grid`], one step at a time, starting from a randomly placed root.
///
/// Pieces are left in their solved orientation; scrambling is the job of [`Scrambler`](crate::Scrambler).
pub struct Generator<'a, R>
where
    R: Rng + ?Sized,
{
    grid: &'a mut Grid,
    rng: &'a mut R,
}

impl<'a, R> Generator<'a, R>
where
    R: Rng + ?Sized,
{
    /// Drive generation of `grid`, drawing choices from `rng`.
    pub fn new(grid: &'a mut Grid, rng: &'a mut R) -> Self {
        Self { grid, rng }
    }

    /// Place the root if there is none, otherwise extend one unclosed cell of the tree.
    ///
    /// Afterwards cells with no empty neighbor left are closed and power is recomputed.
    pub fn step(&mut self) -> Result<GenerationStep, EngineError> {
        if self.grid.is_ready() {
            return Ok(GenerationStep::Ready);
        }

        match self.grid.root().map(|root| root.position()) {
            None => self.place_root(),
            Some(root) => {
                let mut unclosed = unclosed_connected_to(self.grid, root);
                if unclosed.is_empty() {
                    // the tree is boxed in; let closed cells (in practice only the root) grow again
                    unclosed = reopenable_connected_to(self.grid, root);
                }
                let Some(&cell) = unclosed.choose(&mut *self.rng) else {
                    let remaining = self.grid.all_cells().filter(|cell| cell.connections().is_empty()).count();
                    return Err(EngineError::GenerationStalled { remaining });
                };

                for neighbor in connectable_neighbors(self.grid, cell) {
                    if self.grid.cell_at(cell).is_some_and(|c| c.connections().len() < MAX_CONNECTIONS) {
                        connect_bidirectional(self.grid, cell, neighbor);
                    }
                }
            }
        }

        close_surrounded_cells(self.grid);
        recompute_power_state(self.grid);

        if self.grid.is_ready() {
            debug_assert!(self.grid.is_spanning_tree(), "generated links do not form a spanning tree");
            debug!(rows = self.grid.rows(), columns = self.grid.columns(), "generation finished");
            Ok(GenerationStep::Ready)
        } else {
            Ok(GenerationStep::Advanced)
        }
    }

    /// Call [`Self::step`] until the grid is ready.
    pub fn run_to_completion(&mut self) -> Result<(), EngineError> {
        while self.step()? != GenerationStep::Ready {}
        Ok(())
    }

    fn place_root(&mut self) {
        let root = self.grid.position_of_index(self.rng.random_range(0..self.grid.len()));
        self.grid.set_root(root);
        debug!(x = root.x, y = root.y, "placed root");

        let neighbors = connectable_neighbors(self.grid, root);
        if let Some(&neighbor) = neighbors.choose(&mut *self.rng) {
            connect_bidirectional(self.grid, root, neighbor);
        }

        // the root is closed after this first attempt, whatever its outcome
        if let Some(cell) = self.grid.cell_at_mut(root) {
            cell.configured = true;
        }
    }
}

/// Neighbors `position` could be joined to without closing a cycle.
///
/// A neighbor qualifies if the cell does not use that direction yet, the neighbor is not configured,
/// and the two are not already connected through the tree. Empty once the cell is at the connection cap.
pub(crate) fn connectable_neighbors(grid: &Grid, position: Vector2) -> Vec<Vector2> {
    let Some(cell) = grid.cell_at(position) else {
        return Vec::new();
    };
    if cell.connections().len() >= MAX_CONNECTIONS {
        return Vec::new();
    }

    grid.neighbor_positions(position)
        .filter(|(direction, _)| !cell.connects(*direction))
        .filter(|(_, neighbor)| grid.cell_at(*neighbor).is_some_and(|n| !n.is_configured()))
        .filter(|(_, neighbor)| !is_indirectly_connected(grid, position, *neighbor))
        .map(|(_, neighbor)| neighbor)
        .collect_vec()
}

/// Cells of the tree rooted at `root` that are not configured yet, in depth-first order.
///
/// The search passes through configured cells into their linked neighbors, never beyond an unconfigured one.
pub(crate) fn unclosed_connected_to(grid: &Grid, root: Vector2) -> Vec<Vector2> {
    tree_cells_where(grid, root, |cell| !cell.is_configured())
}

/// Configured cells of the tree rooted at `root` that could still legally connect somewhere.
///
/// The root is closed after its first connection attempt; on a single row or column this is the
/// only way the far side of the root gets wired.
pub(crate) fn reopenable_connected_to(grid: &Grid, root: Vector2) -> Vec<Vector2> {
    tree_cells_where(grid, root, |cell| {
        cell.is_configured() && !connectable_neighbors(grid, cell.position()).is_empty()
    })
}

fn tree_cells_where(grid: &Grid, root: Vector2, matches: impl Fn(&Cell) -> bool) -> Vec<Vector2> {
    let mut found = Vec::new();
    let mut visited = HashSet::from([root]);
    let mut stack: Vec<(Vector2, Option<Direction>)> = vec![(root, None)];

    while let Some((position, arrived_from)) = stack.pop() {
        let Some(cell) = grid.cell_at(position) else {
            continue;
        };

        if matches(cell) {
            found.push(position);
            continue;
        }

        // reversed so the first neighbor is explored first
        for neighbor in connected_neighbors(grid, position, arrived_from).into_iter().rev() {
            if visited.insert(neighbor) {
                let back = Direction::between(neighbor, position);
                stack.push((neighbor, back));
            }
        }
    }

    found
}

/// Join two adjacent cells, re-deriving their shapes and closing either one that can take no more edges.
pub(crate) fn connect_bidirectional(grid: &mut Grid, a: Vector2, b: Vector2) {
    let Some(direction) = Direction::between(a, b) else {
        debug_assert!(false, "cannot connect non-adjacent cells {a:?} and {b:?}");
        return;
    };

    trace!(from = ?a, to = ?b, %direction, "connecting");
    for (position, side) in [(a, direction), (b, direction.opposite())] {
        if let Some(cell) = grid.cell_at_mut(position) {
            cell.connect(side);
        }
    }

    for position in [a, b] {
        let closed = grid.cell_at(position)
            .is_some_and(|cell| cell.connections().len() >= MAX_CONNECTIONS)
            || connectable_neighbors(grid, position).is_empty();
        if closed {
            if let Some(cell) = grid.cell_at_mut(position) {
                cell.configured = true;
            }
        }
    }
}

/// Configure every wired cell none of whose neighbors is still empty.
pub(crate) fn close_surrounded_cells(grid: &mut Grid) {
    let surrounded = grid.all_cells()
        .filter(|cell| !cell.is_configured() && !cell.connections().is_empty())
        .filter(|cell| grid.neighbors(cell).iter().all(|neighbor| !neighbor.connections().is_empty()))
        .map(|cell| cell.position())
        .collect_vec();

    for position in surrounded {
        if let Some(cell) = grid.cell_at_mut(position) {
            cell.configured = true;
        }
    }
}
