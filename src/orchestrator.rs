// src/orchestrator.rs
//! Orchestrates the interactive program: routes key presses to widgets,
//! tracks the focus and draws frames onto a [`Display`].
//!
//! The orchestrator never touches the terminal itself, so the whole flow can
//! be driven from tests with a [`crate::display::CellBuffer`] and scripted
//! keys.

use log::{debug, info, trace};

use crate::config::{AppearanceConfig, Config};
use crate::display::Display;
use crate::keys::{KeyEvent, KeySymbol};
use crate::widgets::{
    AppState, EquationEditor, FrameContext, GraphViewer, Layout, Widget,
};

#[cfg(test)]
mod tests;

/// Represents the status of the orchestrator after handling a key.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrchestratorStatus {
    /// Keep reading keys.
    Running,
    /// `q` or Ctrl-C was pressed, or input ended.
    Shutdown,
}

pub struct AppOrchestrator {
    state: AppState,
    widgets: Vec<Widget>,
    /// Index into `widgets`; always a focusable one.
    focus: usize,
    appearance: AppearanceConfig,
}

impl AppOrchestrator {
    /// Parses the configured equations and starts with the graph focused.
    pub fn new(config: &Config) -> Self {
        let state = AppState::new(&config.equations.0);
        info!(
            "Orchestrator: {} equation(s), {} parsed.",
            state.len(),
            state.relations().count()
        );
        AppOrchestrator {
            state,
            widgets: vec![
                Widget::GraphViewer(GraphViewer::new(&config.viewport)),
                Widget::EquationEditor(EquationEditor::new()),
                Widget::TitleBar,
                Widget::StatusBar,
            ],
            focus: 0,
            appearance: config.appearance.clone(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn focused_name(&self) -> &'static str {
        self.widgets[self.focus].focus_name()
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OrchestratorStatus {
        trace!("Orchestrator: key {:?}", key);
        if key.is_interrupt() {
            info!("Orchestrator: Ctrl-C received. Signaling shutdown.");
            return OrchestratorStatus::Shutdown;
        }
        let focused = &mut self.widgets[self.focus];
        if !focused.captures_text() {
            match key.symbol {
                KeySymbol::Char('q') if key.text().is_some() => {
                    info!("Orchestrator: quit requested.");
                    return OrchestratorStatus::Shutdown;
                }
                KeySymbol::Tab => {
                    self.cycle_focus();
                    return OrchestratorStatus::Running;
                }
                _ => {}
            }
        }
        if !focused.handle_key(key, &mut self.state) {
            debug!("Orchestrator: {} ignored {:?}", focused.focus_name(), key);
        }
        OrchestratorStatus::Running
    }

    fn cycle_focus(&mut self) {
        let count = self.widgets.len();
        if let Some(next) = (1..=count)
            .map(|step| (self.focus + step) % count)
            .find(|&i| self.widgets[i].is_focusable())
        {
            self.focus = next;
        }
        debug!("Orchestrator: focus on {}", self.focused_name());
    }

    /// Clears the display, draws every widget and presents the result.
    pub fn draw_frame(&self, display: &mut dyn Display) -> anyhow::Result<()> {
        let (cols, rows) = display.size();
        let layout = Layout::compute(cols, rows, self.appearance.editor_width);
        let focusable: Vec<usize> = (0..self.widgets.len())
            .filter(|&i| self.widgets[i].is_focusable())
            .collect();
        let focused_widget = &self.widgets[self.focus];
        let ctx = FrameContext {
            state: &self.state,
            layout,
            appearance: &self.appearance,
            focus_names: focusable.iter().map(|&i| self.widgets[i].focus_name()).collect(),
            focused: focusable.iter().position(|&i| i == self.focus).unwrap_or(0),
            action: focused_widget.current_action_description(),
            controls: focused_widget.control_descriptions(),
        };

        display.clear();
        for (i, widget) in self.widgets.iter().enumerate() {
            widget.draw(display, &ctx, i == self.focus)?;
        }
        display.present()
    }
}
