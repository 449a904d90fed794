// src/raster/compositor.rs

//! Folds boundary masks into the two-symbol output grid.

use std::fmt;

use super::boundary::BoundaryMask;

/// Default symbol for boundary cells.
pub const DEFAULT_MARK: char = '#';
/// Default symbol for everything else.
pub const DEFAULT_BLANK: char = ' ';

/// The two symbols an output grid is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub mark: char,
    pub blank: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            mark: DEFAULT_MARK,
            blank: DEFAULT_BLANK,
        }
    }
}

/// `height` rows of `width` symbols; row 0 is the top of the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputGrid {
    width: usize,
    height: usize,
    symbols: Symbols,
    marked: Vec<bool>,
}

impl OutputGrid {
    /// An all-blank grid.
    pub fn blank(width: usize, height: usize, symbols: Symbols) -> Self {
        Self {
            width,
            height,
            symbols,
            marked: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn symbols(&self) -> Symbols {
        self.symbols
    }

    pub fn is_marked(&self, x: usize, y: usize) -> bool {
        self.marked[y * self.width + x]
    }

    pub fn symbol_at(&self, x: usize, y: usize) -> char {
        if self.is_marked(x, y) {
            self.symbols.mark
        } else {
            self.symbols.blank
        }
    }

    /// Row `y` as a vector of symbols.
    pub fn row(&self, y: usize) -> Vec<char> {
        (0..self.width).map(|x| self.symbol_at(x, y)).collect()
    }

    pub fn rows(&self) -> Vec<Vec<char>> {
        (0..self.height).map(|y| self.row(y)).collect()
    }

    /// Row `y` as a string.
    pub fn row_string(&self, y: usize) -> String {
        self.row(y).into_iter().collect()
    }

    pub fn marked_count(&self) -> usize {
        self.marked.iter().filter(|&&m| m).count()
    }
}

impl fmt::Display for OutputGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.row_string(y))?;
        }
        Ok(())
    }
}

/// Merges boundary masks with a pixel-wise OR.
///
/// OR is commutative and associative, so the order masks are added in never
/// shows in the result. Relations are not distinguished in the output.
#[derive(Debug, Clone)]
pub struct Compositor {
    grid: OutputGrid,
}

impl Compositor {
    pub fn new(width: usize, height: usize, symbols: Symbols) -> Self {
        Self {
            grid: OutputGrid::blank(width, height, symbols),
        }
    }

    /// ORs `mask` into the grid. The mask must match the grid dimensions.
    pub fn add(&mut self, mask: &BoundaryMask) {
        assert_eq!(
            (mask.width(), mask.height()),
            (self.grid.width, self.grid.height),
            "Compositor: mask dimensions differ from the output grid"
        );
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                if mask.get(x, y) {
                    self.grid.marked[y * self.grid.width + x] = true;
                }
            }
        }
    }

    pub fn finish(self) -> OutputGrid {
        self.grid
    }
}
