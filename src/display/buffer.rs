// src/display/buffer.rs

use log::trace;

use super::{Cell, Display};
use crate::error::DisplayError;

/// An in-memory display, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
        }
    }

    /// Changes the dimensions; the content is reset.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        trace!("CellBuffer: resize {}x{} -> {}x{}", self.cols, self.rows, cols, rows);
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::default(); cols * rows];
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.cols && y < self.rows {
            Some(self.cells[y * self.cols + x])
        } else {
            None
        }
    }

    /// Characters of row `y`, or an empty string past the last row.
    pub fn row_text(&self, y: usize) -> String {
        if y >= self.rows {
            return String::new();
        }
        self.cells[y * self.cols..(y + 1) * self.cols]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `chunks` rejects a zero size.
        self.cells.chunks(self.cols.max(1))
    }
}

impl Display for CellBuffer {
    fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn put_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), DisplayError> {
        self.check_area(x, y, 1, 1)?;
        self.cells[y * self.cols + x] = cell;
        Ok(())
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
