// src/widgets/viewer.rs

//! The graph canvas: renders the parsed relations and navigates the view.

use log::{debug, trace, warn};

use super::{ControlDescription, FrameContext};
use crate::config::ViewportConfig;
use crate::display::Display;
use crate::keys::{KeyEvent, KeySymbol};
use crate::raster::{render_with_symbols, CanvasSize, Predicate, Viewport};

pub const CONTROLS: [ControlDescription; 3] =
    [("Arrows", "Pan"), ("+/-", "Zoom"), ("0", "Reset")];

#[derive(Debug, Clone, PartialEq)]
pub struct GraphViewer {
    viewport: Viewport,
    initial: Viewport,
    pan_fraction: f64,
    zoom_factor: f64,
}

impl GraphViewer {
    /// Starts at the configured viewport, or the default one if that is
    /// degenerate.
    pub fn new(config: &ViewportConfig) -> Self {
        let initial = match config.initial.validate() {
            Ok(()) => config.initial,
            Err(e) => {
                warn!("GraphViewer: {}. Using the default viewport.", e);
                ViewportConfig::default().initial
            }
        };
        Self {
            viewport: initial,
            initial,
            pan_fraction: config.pan_fraction,
            zoom_factor: config.zoom_factor,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Navigation keys. A move that would leave the viewport degenerate is
    /// ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let f = self.pan_fraction;
        let next = match key.symbol {
            KeySymbol::Left => Some(self.viewport.panned(-f, 0.0)),
            KeySymbol::Right => Some(self.viewport.panned(f, 0.0)),
            KeySymbol::Up => Some(self.viewport.panned(0.0, f)),
            KeySymbol::Down => Some(self.viewport.panned(0.0, -f)),
            KeySymbol::Char('+') | KeySymbol::Char('=') => self.viewport.zoomed(self.zoom_factor),
            KeySymbol::Char('-') => self.viewport.zoomed(1.0 / self.zoom_factor),
            KeySymbol::Char('0') => Some(self.initial),
            _ => return false,
        };
        match next.filter(|v| v.validate().is_ok()) {
            Some(viewport) => {
                trace!("GraphViewer: viewport {:?}", viewport);
                self.viewport = viewport;
            }
            None => debug!("GraphViewer: ignoring {:?} at viewport {:?}", key.symbol, self.viewport),
        }
        true
    }

    pub fn draw(&self, display: &mut dyn Display, ctx: &FrameContext<'_>) -> anyhow::Result<()> {
        let area = ctx.layout.canvas;
        let colors = &ctx.appearance.colors;
        if area.is_empty() {
            return Ok(());
        }
        let symbols = ctx.appearance.symbols();
        let blank_row: String = std::iter::repeat(symbols.blank).take(area.width).collect();
        for y in area.y..area.y + area.height {
            display.draw_text(
                area.x,
                y,
                &blank_row,
                colors.graph_foreground,
                colors.graph_background,
            )?;
        }

        let canvas = CanvasSize::new(area.width, area.height);
        if canvas.validate().is_err() {
            debug!("GraphViewer: canvas {}x{} too small to render", area.width, area.height);
            return Ok(());
        }
        let relations: Vec<&dyn Predicate> = ctx
            .state
            .relations()
            .map(|relation| {
                trace!("GraphViewer: drawing {}", relation.source());
                relation as &dyn Predicate
            })
            .collect();
        let grid = render_with_symbols(
            &relations,
            self.viewport,
            canvas,
            symbols,
        )?;
        display.overlay(
            area.x,
            area.y,
            &grid,
            colors.graph_foreground,
            colors.graph_background,
        )?;
        Ok(())
    }
}
