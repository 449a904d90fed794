// src/raster/sampler.rs

//! Evaluates a relation over the padded sample grid.

use log::trace;

use super::viewport::ViewportMapper;
use crate::error::EvalError;

/// A boolean relation between two world coordinates.
///
/// The engine only borrows predicates for the duration of one render call.
pub trait Predicate {
    /// Whether the relation holds at `(x, y)`. An `Err` marks a point where
    /// the relation is undefined.
    fn holds(&self, x: f64, y: f64) -> Result<bool, EvalError>;
}

impl<F> Predicate for F
where
    F: Fn(f64, f64) -> Result<bool, EvalError>,
{
    fn holds(&self, x: f64, y: f64) -> Result<bool, EvalError> {
        self(x, y)
    }
}

/// Padded `(width + 2) x (height + 2)` truth values of one relation.
///
/// Stored column-major (`cells[x * height + y]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleField {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    masked: usize,
}

impl SampleField {
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
            masked: 0,
        }
    }

    /// Padded width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Padded height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The value at `(x, y)`, or `None` outside the field.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> Option<bool> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[x * self.height + y])
    }

    /// Number of samples whose evaluation failed and were recorded as `false`.
    pub fn masked_samples(&self) -> usize {
        self.masked
    }
}

/// Samples predicates over the padded grid described by a mapper.
#[derive(Debug, Clone, Copy)]
pub struct GridSampler {
    mapper: ViewportMapper,
    padded_width: usize,
    padded_height: usize,
}

impl GridSampler {
    pub fn new(mapper: ViewportMapper, padded_width: usize, padded_height: usize) -> Self {
        Self {
            mapper,
            padded_width,
            padded_height,
        }
    }

    /// Evaluates `predicate` at every padded cell.
    ///
    /// Evaluation failures are recorded as `false` and counted, they never
    /// abort the pass.
    pub fn sample(&self, predicate: &dyn Predicate) -> SampleField {
        let mut masked = 0;
        let mut field = SampleField::from_fn(self.padded_width, self.padded_height, |px, py| {
            let (wx, wy) = self.mapper.pixel_to_world(px, py);
            match predicate.holds(wx, wy) {
                Ok(value) => value,
                Err(e) => {
                    trace!("GridSampler: sample ({}, {}) masked: {}", wx, wy, e);
                    masked += 1;
                    false
                }
            }
        });
        field.masked = masked;
        field
    }
}
