//! Bindings for a browser front end, behind the `wasm` feature.
//!
//! The front end owns a [`Netwalk`] handle, redraws from [`Netwalk::cells`] after every call,
//! and sends clicks back as [`Netwalk::rotate`] with the clicked cell's id.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::cell::{Cell, CellId};
use crate::engine::PuzzleEngine;
use crate::error::EngineError;
use crate::PuzzleBuilder;

impl From<EngineError> for JsValue {
    fn from(value: EngineError) -> Self {
        JsValue::from_str(&value.to_string())
    }
}

/// A puzzle handle for JavaScript.
#[wasm_bindgen]
pub struct Netwalk {
    engine: PuzzleEngine,
}

#[wasm_bindgen]
impl Netwalk {
    /// Generate and scramble a new puzzle, reproducibly if `seed` is given.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, columns: usize, seed: Option<u64>) -> Result<Netwalk, JsValue> {
        let mut builder = PuzzleBuilder::with_dims(rows, columns);
        if let Some(seed) = seed {
            builder.seed(seed);
        }
        Ok(Self { engine: builder.build()? })
    }

    /// Replace the puzzle with a fresh one of the given size.
    #[wasm_bindgen(js_name = newPuzzle)]
    pub fn new_puzzle(&mut self, rows: usize, columns: usize) -> Result<(), JsValue> {
        self.engine.new_puzzle(rows, columns)?;
        Ok(())
    }

    /// Turn cell `id` a quarter turn clockwise and report whether the puzzle is now solved.
    pub fn rotate(&mut self, id: u64) -> Result<bool, JsValue> {
        self.engine.rotate_cell(CellId(id))?;
        Ok(self.engine.is_solved())
    }

    #[allow(missing_docs)]
    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.engine.is_solved()
    }

    #[allow(missing_docs)]
    pub fn rows(&self) -> usize {
        self.engine.grid().rows()
    }

    #[allow(missing_docs)]
    pub fn columns(&self) -> usize {
        self.engine.grid().columns()
    }

    /// Every cell, row-major, as `{ id, x, y, shape, orientation, connections, powered }`.
    pub fn cells(&self) -> Result<Array, JsValue> {
        self.engine.grid().all_cells().map(cell_to_js).collect()
    }
}

fn cell_to_js(cell: &Cell) -> Result<JsValue, JsValue> {
    let object = Object::new();
    let connections = cell.connections().iter()
        .map(|direction| {
            let name: &'static str = direction.into();
            JsValue::from_str(name)
        })
        .collect::<Array>();
    let shape: &'static str = cell.shape().into();

    Reflect::set(&object, &"id".into(), &cell.id().get().into())?;
    Reflect::set(&object, &"x".into(), &cell.position().x.into())?;
    Reflect::set(&object, &"y".into(), &cell.position().y.into())?;
    Reflect::set(&object, &"shape".into(), &shape.into())?;
    Reflect::set(&object, &"orientation".into(), &cell.orientation().into())?;
    Reflect::set(&object, &"connections".into(), &connections)?;
    Reflect::set(&object, &"powered".into(), &cell.is_powered().into())?;

    Ok(object.into())
}
