use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::cell::{Cell, CellId};
use crate::connectivity::linked;
use crate::shape::{Direction, PieceShape};
use crate::vector::{Dimension, Vector2};

// ids are handed out in blocks, one block per grid, and never reused
static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(0);

/// A rows by columns container exclusively owning its [`Cell`]s, stored row-major.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Cell>,
    first_id: u64,
}

impl Grid {
    /// Construct a grid of empty, unconfigured, unrandomized cells, each with a fresh [`CellId`].
    pub fn create(rows: Dimension, columns: Dimension) -> Self {
        let len = rows.get() * columns.get();
        let first_id = NEXT_CELL_ID.fetch_add(len as u64, Ordering::Relaxed);

        let cells = Array2::from_shape_fn((rows.get(), columns.get()), |(row, column)| {
            Cell::new(CellId(first_id + (row * columns.get() + column) as u64), Vector2::from((row, column)))
        });

        Self { cells, first_id }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `position`, or [`None`] if it lies outside the grid.
    pub fn cell_at(&self, position: Vector2) -> Option<&Cell> {
        self.cells.get(position.as_index()?)
    }

    pub(crate) fn cell_at_mut(&mut self, position: Vector2) -> Option<&mut Cell> {
        self.cells.get_mut(position.as_index()?)
    }

    /// The cell identified by `id`, or [`None`] if it belongs to another grid.
    pub fn find(&self, id: CellId) -> Option<&Cell> {
        let offset = id.0.checked_sub(self.first_id)? as usize;
        self.cells
            .get((offset / self.columns(), offset % self.columns()))
            .filter(|cell| cell.id == id)
    }

    /// The cell identified by `id`.
    ///
    /// # Panics
    /// If `id` was not issued by this grid. Identifiers only come from [`Grid::create`], so this is a caller bug.
    pub fn cell_by_id(&self, id: CellId) -> &Cell {
        match self.find(id) {
            Some(cell) => cell,
            None => panic!("cell {id} does not belong to this grid"),
        }
    }

    /// The in-bounds neighbors of `position` together with the direction leading to each.
    pub(crate) fn neighbor_positions(&self, position: Vector2) -> impl Iterator<Item = (Direction, Vector2)> + '_ {
        Direction::VARIANTS.iter()
            .map(move |dir| (*dir, dir.attempt_from(position)))
            .filter(move |(_, neighbor)| self.cell_at(*neighbor).is_some())
    }

    /// Up to four orthogonal neighbors of `cell`, in up, down, left, right order.
    pub fn neighbors(&self, cell: &Cell) -> Vec<&Cell> {
        self.neighbor_positions(cell.position)
            .filter_map(|(_, neighbor)| self.cell_at(neighbor))
            .collect_vec()
    }

    /// Every cell in row-major order.
    pub fn all_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn all_cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// The position of the `index`th cell in row-major order.
    pub(crate) fn position_of_index(&self, index: usize) -> Vector2 {
        Vector2::from((index / self.columns(), index % self.columns()))
    }

    /// The server cell, once generation has placed it.
    pub fn root(&self) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.is_root())
    }

    pub(crate) fn set_root(&mut self, position: Vector2) {
        if let Some(cell) = self.cell_at_mut(position) {
            cell.shape = PieceShape::Root;
        }
    }

    /// Whether generation has finished: a root is placed and every cell carries at least one connection.
    ///
    /// A single-cell grid is ready as soon as its root is placed.
    pub fn is_ready(&self) -> bool {
        self.root().is_some() && (self.len() == 1 || self.cells.iter().all(|cell| !cell.connections.is_empty()))
    }

    /// Whether every cell has been through its scramble rotation.
    pub fn is_randomized(&self) -> bool {
        self.cells.iter().all(|cell| cell.randomized)
    }

    /// Whether every cell is powered.
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|cell| cell.powered)
    }

    /// Number of cells currently wired to the root.
    pub fn powered_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.powered).count()
    }

    /// Every pair of adjacent cells whose pieces currently match.
    pub fn edges(&self) -> HashSet<UnorderedPair<Vector2>> {
        self.link_graph()
            .all_edges()
            .map(|(a, b, _)| UnorderedPair::from((a, b)))
            .collect()
    }

    /// The graph of current links; every cell is a node, edge weights are the direction from the upper or left cell.
    pub fn link_graph(&self) -> UnGraphMap<Vector2, Direction> {
        let mut graph = UnGraphMap::with_capacity(
            self.len(),
            // "horizontal" links
            (self.columns() - 1) * self.rows()
                // "vertical" links
                + (self.rows() - 1) * self.columns(),
        );

        for cell in self.cells.iter() {
            graph.add_node(cell.position);
        }

        for cell in self.cells.iter() {
            // only look down and to the right so each link is seen once
            for direction in [Direction::Down, Direction::Right] {
                let neighbor = direction.attempt_from(cell.position);
                if linked(self, cell.position, neighbor) {
                    graph.add_edge(cell.position, neighbor, direction);
                }
            }
        }

        graph
    }

    /// Whether the current links form a single tree touching every cell.
    pub fn is_spanning_tree(&self) -> bool {
        let graph = self.link_graph();
        if graph.edge_count() + 1 != graph.node_count() {
            return false;
        }

        let Some(start) = graph.nodes().next() else {
            return false;
        };
        let mut dfs = Dfs::new(&graph, start);
        let mut seen = 0;
        while dfs.next(&graph).is_some() {
            seen += 1;
        }

        seen == graph.node_count()
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
