// src/raster/boundary.rs

//! Boundary extraction: marks the cells where a relation's truth value
//! changes between 4-neighbours.

use super::sampler::SampleField;

/// Cropped `width x height` boundary flags of one relation, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl BoundaryMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether canvas cell `(x, y)` lies on the boundary. Panics out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "BoundaryMask index out of range");
        self.cells[y * self.width + x]
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, value: bool) {
        self.cells[y * self.width + x] = value;
    }

    /// Number of marked cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Converts padded sample fields into cropped boundary masks.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoundaryExtractor;

impl BoundaryExtractor {
    /// Cells outside the padded field count as `true`.
    #[inline]
    fn neighbor(field: &SampleField, x: isize, y: isize) -> bool {
        field.get(x, y).unwrap_or(true)
    }

    /// A padded cell is on the boundary when it holds and at least one of
    /// its 4-neighbours does not.
    pub fn is_boundary(field: &SampleField, x: usize, y: usize) -> bool {
        let (x, y) = (x as isize, y as isize);
        if !field.get(x, y).unwrap_or(false) {
            return false;
        }
        !(Self::neighbor(field, x - 1, y)
            && Self::neighbor(field, x, y - 1)
            && Self::neighbor(field, x, y + 1)
            && Self::neighbor(field, x + 1, y))
    }

    /// Boundary flags for padded indices `[1, width] x [1, height]`.
    ///
    /// The outermost padding ring is only ever read as a neighbour, so the
    /// out-of-range convention cannot leak into the visible mask.
    pub fn extract(&self, field: &SampleField) -> BoundaryMask {
        let width = field.width().saturating_sub(2);
        let height = field.height().saturating_sub(2);
        let mut mask = BoundaryMask::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, Self::is_boundary(field, x + 1, y + 1));
            }
        }
        mask
    }
}
