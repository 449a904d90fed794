// src/raster/viewport.rs

//! World-space viewport, canvas dimensions and the affine mapping between
//! padded sample indices and world coordinates.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// World-space rectangle shown on the canvas.
///
/// `right > left` and `top > bottom`; the y axis points up while canvas rows
/// grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Viewport {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Checks the ordering invariants. NaN bounds fail too.
    pub fn validate(&self) -> Result<(), RenderError> {
        let finite = [self.left, self.right, self.top, self.bottom]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(RenderError::InvalidConfiguration(format!(
                "viewport bounds must be finite, got {:?}",
                self
            )));
        }
        if !(self.right > self.left) {
            return Err(RenderError::InvalidConfiguration(format!(
                "viewport right ({}) must be greater than left ({})",
                self.right, self.left
            )));
        }
        if !(self.top > self.bottom) {
            return Err(RenderError::InvalidConfiguration(format!(
                "viewport top ({}) must be greater than bottom ({})",
                self.top, self.bottom
            )));
        }
        Ok(())
    }

    /// Shifts the viewport by a fraction of its own span.
    ///
    /// Positive `dx` moves right, positive `dy` moves up.
    pub fn panned(&self, dx_fraction: f64, dy_fraction: f64) -> Self {
        let dx = self.width() * dx_fraction;
        let dy = self.height() * dy_fraction;
        Self {
            left: self.left + dx,
            right: self.right + dx,
            top: self.top + dy,
            bottom: self.bottom + dy,
        }
    }

    /// Scales both spans around the centre. `factor > 1` zooms in.
    ///
    /// Returns `None` when the result would break the viewport invariants
    /// (non-positive factor, spans collapsing to zero or overflowing).
    pub fn zoomed(&self, factor: f64) -> Option<Self> {
        if !(factor > 0.0) || !factor.is_finite() {
            return None;
        }
        let (cx, cy) = self.center();
        let half_w = self.width() / factor / 2.0;
        let half_h = self.height() / factor / 2.0;
        let zoomed = Self {
            left: cx - half_w,
            right: cx + half_w,
            top: cy + half_h,
            bottom: cy - half_h,
        };
        zoomed.validate().ok().map(|_| zoomed)
    }
}

/// Canvas dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

impl CanvasSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Both dimensions must be at least 2, the mapping divides by `size - 1`.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width < 2 || self.height < 2 {
            return Err(RenderError::InvalidConfiguration(format!(
                "canvas must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Dimensions of the sample field: one extra cell on every side.
    pub fn padded(&self) -> (usize, usize) {
        (self.width + 2, self.height + 2)
    }
}

/// Maps padded sample indices to world coordinates.
///
/// Padded index `1` lines up with canvas pixel `0`, so canvas column 0 lands
/// exactly on `left` and canvas row 0 on `top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMapper {
    left: f64,
    top: f64,
    step_x: f64,
    step_y: f64,
}

impl ViewportMapper {
    pub fn new(viewport: Viewport, canvas: CanvasSize) -> Result<Self, RenderError> {
        canvas.validate()?;
        viewport.validate()?;
        Ok(Self {
            left: viewport.left,
            top: viewport.top,
            step_x: viewport.width() / (canvas.width - 1) as f64,
            step_y: viewport.height() / (canvas.height - 1) as f64,
        })
    }

    pub fn step(&self) -> (f64, f64) {
        (self.step_x, self.step_y)
    }

    /// World coordinates of padded cell `(px, py)`.
    #[inline]
    pub fn pixel_to_world(&self, px: usize, py: usize) -> (f64, f64) {
        let wx = self.left + self.step_x * (px as f64 - 1.0);
        let wy = self.top - self.step_y * (py as f64 - 1.0);
        (wx, wy)
    }
}
