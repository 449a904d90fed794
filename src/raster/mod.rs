// src/raster/mod.rs

//! The rasterization engine.
//!
//! A render pass maps the viewport onto a padded sample grid, evaluates every
//! relation at each padded cell, extracts the cells where the relation's
//! truth value changes and ORs the per-relation masks into one grid:
//!
//! `ViewportMapper -> GridSampler -> BoundaryExtractor` per relation, then
//! `Compositor` over all of them.
//!
//! Rendering is a pure function of its inputs; nothing is cached between
//! calls.

pub mod boundary;
pub mod compositor;
pub mod sampler;
pub mod viewport;

#[cfg(test)]
mod tests;

pub use boundary::{BoundaryExtractor, BoundaryMask};
pub use compositor::{Compositor, OutputGrid, Symbols};
pub use sampler::{GridSampler, Predicate, SampleField};
pub use viewport::{CanvasSize, Viewport, ViewportMapper};

use log::{debug, trace};

use crate::error::RenderError;

/// Renders `relations` with the default `#` / space symbols.
pub fn render(
    relations: &[&dyn Predicate],
    viewport: Viewport,
    canvas: CanvasSize,
) -> Result<OutputGrid, RenderError> {
    render_with_symbols(relations, viewport, canvas, Symbols::default())
}

/// Renders `relations` into a `canvas.width x canvas.height` grid.
///
/// Fails with `RenderError::InvalidConfiguration` before any sampling when
/// the viewport or canvas is degenerate. Undefined sample points are drawn as
/// "relation does not hold"; the number of such points is logged once per
/// relation.
pub fn render_with_symbols(
    relations: &[&dyn Predicate],
    viewport: Viewport,
    canvas: CanvasSize,
    symbols: Symbols,
) -> Result<OutputGrid, RenderError> {
    let mapper = ViewportMapper::new(viewport, canvas)?;
    let (padded_width, padded_height) = canvas.padded();
    let sampler = GridSampler::new(mapper, padded_width, padded_height);
    let mut compositor = Compositor::new(canvas.width, canvas.height, symbols);

    trace!(
        "render: {} relation(s), viewport {:?}, canvas {}x{}",
        relations.len(),
        viewport,
        canvas.width,
        canvas.height
    );

    for (index, relation) in relations.iter().enumerate() {
        let field = sampler.sample(*relation);
        if field.masked_samples() > 0 {
            debug!(
                "render: relation {} undefined at {} of {} samples",
                index,
                field.masked_samples(),
                padded_width * padded_height
            );
        }
        let mask = BoundaryExtractor.extract(&field);
        trace!("render: relation {} has {} boundary cells", index, mask.count());
        compositor.add(&mask);
    }

    Ok(compositor.finish())
}
