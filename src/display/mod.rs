// src/display/mod.rs

//! The character-cell display sink.
//!
//! Widgets draw through the [`Display`] trait. Implementations only provide
//! cell storage and presentation; the drawing primitives are provided
//! methods that validate their area first and fail with a [`DisplayError`]
//! instead of clipping or wrapping.
//!
//! - [`CellBuffer`]: in-memory grid, used by tests and as the console's back
//!   buffer.
//! - [`ConsoleDisplay`]: raw-mode terminal output.

pub mod buffer;
pub mod console;


pub use buffer::CellBuffer;
pub use console::ConsoleDisplay;

use crate::color::NamedColor;
use crate::error::DisplayError;
use crate::raster::OutputGrid;

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: NamedColor,
    pub bg: NamedColor,
}

impl Cell {
    pub fn new(ch: char, fg: NamedColor, bg: NamedColor) -> Self {
        Self { ch, fg, bg }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: NamedColor::White,
            bg: NamedColor::Black,
        }
    }
}

/// A grid of `cols x rows` character cells.
pub trait Display {
    /// `(cols, rows)`.
    fn size(&self) -> (usize, usize);

    /// Writes one cell. Out-of-range coordinates are an `Overflow`.
    fn put_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), DisplayError>;

    /// Resets every cell to `Cell::default()`.
    fn clear(&mut self);

    /// Makes everything drawn since the last call visible.
    fn present(&mut self) -> anyhow::Result<()>;

    /// Fails unless the `width x height` area at `(x, y)` lies inside the display.
    fn check_area(&self, x: usize, y: usize, width: usize, height: usize) -> Result<(), DisplayError> {
        let (cols, rows) = self.size();
        let fits_x = x.checked_add(width).is_some_and(|end| end <= cols);
        let fits_y = y.checked_add(height).is_some_and(|end| end <= rows);
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(DisplayError::Overflow {
                x,
                y,
                width,
                height,
                cols,
                rows,
            })
        }
    }

    /// Writes a single line of text starting at `(x, y)`.
    fn draw_text(
        &mut self,
        x: usize,
        y: usize,
        text: &str,
        fg: NamedColor,
        bg: NamedColor,
    ) -> Result<(), DisplayError> {
        if text.contains('\n') {
            return Err(DisplayError::InvalidText(text.to_string()));
        }
        self.check_area(x, y, text.chars().count(), 1)?;
        for (i, ch) in text.chars().enumerate() {
            self.put_cell(x + i, y, Cell::new(ch, fg, bg))?;
        }
        Ok(())
    }

    /// Fills the area with spaces on `color`.
    fn draw_rectangle(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        color: NamedColor,
    ) -> Result<(), DisplayError> {
        self.check_area(x, y, width, height)?;
        let blank = Cell::new(' ', color, color);
        for row in y..y + height {
            for col in x..x + width {
                self.put_cell(col, row, blank)?;
            }
        }
        Ok(())
    }

    /// Fills the area with `bg` and centres `text` in it.
    ///
    /// The text goes on row `y + height / 2`; an odd horizontal leftover leans
    /// left.
    #[allow(clippy::too_many_arguments)]
    fn draw_centered_text(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        text: &str,
        fg: NamedColor,
        bg: NamedColor,
    ) -> Result<(), DisplayError> {
        if text.contains('\n') {
            return Err(DisplayError::InvalidText(text.to_string()));
        }
        let len = text.chars().count();
        if len > width {
            return Err(DisplayError::TextTooWide {
                text: text.to_string(),
                width,
            });
        }
        self.check_area(x, y, width, height.max(1))?;
        self.draw_rectangle(x, y, width, height, bg)?;
        self.draw_text(x + (width - len) / 2, y + height / 2, text, fg, bg)
    }

    /// Copies the marked cells of `grid` with its top-left corner at `(x, y)`.
    ///
    /// Blank cells are skipped, so grids drawn on top of each other combine.
    fn overlay(
        &mut self,
        x: usize,
        y: usize,
        grid: &OutputGrid,
        fg: NamedColor,
        bg: NamedColor,
    ) -> Result<(), DisplayError> {
        self.check_area(x, y, grid.width(), grid.height())?;
        let mark = grid.symbols().mark;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if grid.is_marked(col, row) {
                    self.put_cell(x + col, y + row, Cell::new(mark, fg, bg))?;
                }
            }
        }
        Ok(())
    }
}
