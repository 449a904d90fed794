// src/widgets/mod.rs

//! Screen regions of the interactive program and the state they share.
//!
//! Widgets are a closed set, so they are an enum rather than trait objects.
//! The orchestrator owns one of each and forwards draw and key calls.

pub mod bars;
pub mod editor;
pub mod viewer;


pub use editor::EquationEditor;
pub use viewer::GraphViewer;

use log::{debug, info};

use crate::config::AppearanceConfig;
use crate::display::Display;
use crate::error::ParseError;
use crate::expr::{Equation, Relation};
use crate::keys::KeyEvent;

/// Key and description of one control shown in the status bar.
pub type ControlDescription = (&'static str, &'static str);

/// Controls available whatever widget has the focus.
pub const GLOBAL_CONTROLS: [ControlDescription; 2] = [("(Tab)", "Switch Mode"), ("q", "Quit")];

/// One line of the equation list.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationEntry {
    pub text: String,
    /// `None` while the text is blank.
    pub relation: Option<Result<Relation, ParseError>>,
}

impl EquationEntry {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let relation = if text.trim().is_empty() {
            None
        } else {
            Some(Equation::from_text(&text).and_then(|equation| equation.parse()))
        };
        Self { text, relation }
    }

    pub fn error(&self) -> Option<&ParseError> {
        match &self.relation {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }
}

/// A parse error shown in the status bar, tied to the equation it names.
#[derive(Debug, Clone, PartialEq)]
struct Diagnostic {
    index: usize,
    message: String,
}

impl Diagnostic {
    fn new(index: usize, error: &ParseError) -> Self {
        Self {
            index,
            message: format!("Equation {}: {}", index + 1, error),
        }
    }
}

/// Equations, their parsed relations and the latest diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    entries: Vec<EquationEntry>,
    diagnostic: Option<Diagnostic>,
}

impl AppState {
    /// Parses every text. The list always holds at least one (possibly blank)
    /// equation. The first broken equation becomes the diagnostic.
    pub fn new(texts: &[String]) -> Self {
        let mut state = Self {
            entries: Vec::new(),
            diagnostic: None,
        };
        for text in texts {
            state.entries.push(EquationEntry::new(text.clone()));
            let index = state.entries.len() - 1;
            if state.diagnostic.is_none() {
                state.report(index);
            } else if let Some(e) = state.entries[index].error() {
                info!("Equation {}: {}", index + 1, e);
            }
        }
        if state.entries.is_empty() {
            state.entries.push(EquationEntry::new(""));
        }
        state
    }

    pub fn entries(&self) -> &[EquationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_ref().map(|d| d.message.as_str())
    }

    /// Relations that parsed successfully, in list order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.entries
            .iter()
            .filter_map(|entry| entry.relation.as_ref().and_then(|r| r.as_ref().ok()))
    }

    /// Replaces the text of equation `index` and parses it.
    pub fn set_equation(&mut self, index: usize, text: impl Into<String>) {
        self.entries[index] = EquationEntry::new(text);
        self.diagnostic = None;
        self.report(index);
    }

    /// Inserts a blank equation after `index` and returns the new index.
    pub fn insert_after(&mut self, index: usize) -> usize {
        let at = (index + 1).min(self.entries.len());
        self.entries.insert(at, EquationEntry::new(""));
        debug!("AppState: inserted equation {}", at + 1);
        if let Some(index) = self.diagnostic.as_ref().map(|d| d.index) {
            if index >= at {
                self.renumber_diagnostic(index + 1);
            }
        }
        at
    }

    /// Removes equation `index`; the last remaining one is blanked instead.
    pub fn remove(&mut self, index: usize) {
        if self.entries.len() == 1 {
            self.entries[0] = EquationEntry::new("");
        } else {
            self.entries.remove(index);
        }
        debug!("AppState: removed equation {}", index + 1);
        match self.diagnostic.as_ref().map(|d| d.index) {
            Some(shown) if shown == index => self.diagnostic = None,
            Some(shown) if shown > index => self.renumber_diagnostic(shown - 1),
            _ => {}
        }
    }

    /// Makes the parse error of `index`, if any, the current diagnostic.
    fn report(&mut self, index: usize) {
        if let Some(e) = self.entries[index].error() {
            let diagnostic = Diagnostic::new(index, e);
            info!("{}", diagnostic.message);
            self.diagnostic = Some(diagnostic);
        }
    }

    /// Points the diagnostic at the equation now at `index`.
    fn renumber_diagnostic(&mut self, index: usize) {
        self.diagnostic = self.entries[index]
            .error()
            .map(|e| Diagnostic::new(index, e));
    }
}

/// A `width x height` region at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where each widget goes on a `cols x rows` display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub title: Rect,
    pub status: Rect,
    pub editor: Rect,
    pub canvas: Rect,
}

impl Layout {
    /// Title on the first row, status on the last, the editor and the canvas
    /// side by side in between.
    pub fn compute(cols: usize, rows: usize, editor_width: usize) -> Self {
        let body_height = rows.saturating_sub(2);
        let editor_width = editor_width.min(cols);
        Self {
            title: Rect::new(0, 0, cols, rows.min(1)),
            status: if rows >= 2 {
                Rect::new(0, rows - 1, cols, 1)
            } else {
                Rect::default()
            },
            editor: Rect::new(0, 1, editor_width, body_height),
            canvas: Rect::new(editor_width, 1, cols - editor_width, body_height),
        }
    }
}

/// What a widget needs to know to draw itself.
pub struct FrameContext<'a> {
    pub state: &'a AppState,
    pub layout: Layout,
    pub appearance: &'a AppearanceConfig,
    /// Names of the focusable widgets, in cycling order.
    pub focus_names: Vec<&'static str>,
    /// Position of the focused widget in `focus_names`.
    pub focused: usize,
    pub action: &'static str,
    pub controls: Vec<ControlDescription>,
}

pub enum Widget {
    TitleBar,
    StatusBar,
    EquationEditor(EquationEditor),
    GraphViewer(GraphViewer),
}

impl Widget {
    pub fn draw(
        &self,
        display: &mut dyn Display,
        ctx: &FrameContext<'_>,
        focused: bool,
    ) -> anyhow::Result<()> {
        match self {
            Widget::TitleBar => bars::draw_title(display, ctx),
            Widget::StatusBar => bars::draw_status(display, ctx),
            Widget::EquationEditor(editor) => editor.draw(display, ctx, focused),
            Widget::GraphViewer(viewer) => viewer.draw(display, ctx),
        }
    }

    /// Returns `true` when the key was used.
    pub fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> bool {
        match self {
            Widget::TitleBar | Widget::StatusBar => false,
            Widget::EquationEditor(editor) => editor.handle_key(key, state),
            Widget::GraphViewer(viewer) => viewer.handle_key(key),
        }
    }

    /// Name in the status bar; empty for widgets that never take the focus.
    pub fn focus_name(&self) -> &'static str {
        match self {
            Widget::TitleBar | Widget::StatusBar => "",
            Widget::EquationEditor(_) => "Edit",
            Widget::GraphViewer(_) => "Pan",
        }
    }

    pub fn is_focusable(&self) -> bool {
        !self.focus_name().is_empty()
    }

    pub fn current_action_description(&self) -> &'static str {
        match self {
            Widget::TitleBar | Widget::StatusBar => "",
            Widget::EquationEditor(editor) => editor.current_action_description(),
            Widget::GraphViewer(_) => "Panning",
        }
    }

    pub fn control_descriptions(&self) -> Vec<ControlDescription> {
        match self {
            Widget::TitleBar | Widget::StatusBar => Vec::new(),
            Widget::EquationEditor(editor) => editor.control_descriptions(),
            Widget::GraphViewer(_) => viewer::CONTROLS.to_vec(),
        }
    }

    /// True while the widget wants every printable key, `q` and Tab included.
    pub fn captures_text(&self) -> bool {
        match self {
            Widget::EquationEditor(editor) => editor.is_editing(),
            _ => false,
        }
    }
}

/// The first `width` characters of `text`.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
