#![warn(missing_docs)]

//! # `netwalk`
//!
//! The engine behind Netwalk, the network wiring puzzle: a rectangular grid of cells each holding a pipe piece,
//! which the player rotates until every cell is wired, through matching edges, back to a single root "server" cell.
//! Begin with a [`PuzzleBuilder`] (or [`PuzzleEngine::new`]), then call [`rotate_cell`](PuzzleEngine::rotate_cell)
//! with identifiers read off [`PuzzleEngine::grid`] until [`is_solved`](PuzzleEngine::is_solved) holds.
//!
//! Drawing the grid is left to the caller; [`Grid`] implements [`Display`](std::fmt::Display) with box-drawing
//! characters, and the `wasm` feature exposes the engine to a browser front end.
//!
//! # Internals
//! A puzzle is made in two passes over a grid of empty cells.
//!
//! 1. The [`Generator`] grows a random spanning tree. It places the root on a random cell, then repeatedly picks a
//! random "unclosed" cell of the tree and joins it to each empty neighbor, never exceeding three connections per cell
//! and refusing any edge whose ends are already connected through the tree, so no cycle can form.
//! Every piece is left in its solved orientation.
//! 2. The [`Scrambler`] visits every cell once and turns its piece 0 to 3 quarter turns. A quarter turn only changes
//! which directions a piece uses, never how many, so the solved layout is always reachable.
//!
//! After every mutation the set of powered cells, those linked to the root, is recomputed by a depth-first walk.
//! Two adjacent cells are linked when each uses the direction facing the other.

pub use builder::PuzzleBuilder;
pub use cell::{Cell, CellId};
pub use engine::{Phase, PuzzleEngine};
pub use error::EngineError;
pub use generator::{GenerationStep, Generator};
pub use grid::Grid;
pub use scrambler::Scrambler;
pub use shape::{Connections, Direction, PieceShape, MAX_CONNECTIONS};
pub use vector::Vector2;

pub mod builder;
pub(crate) mod cell;
pub mod connectivity;
pub(crate) mod engine;
pub(crate) mod error;
pub(crate) mod generator;
pub(crate) mod grid;
pub mod rotation;
pub(crate) mod scrambler;
pub(crate) mod shape;
pub(crate) mod vector;
#[cfg(feature = "wasm")]
pub mod wasm;
