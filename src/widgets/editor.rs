// src/widgets/editor.rs

//! The numbered equation list and its line editor.

use log::debug;

use super::{truncate, AppState, ControlDescription, FrameContext};
use crate::display::Display;
use crate::keys::{KeyEvent, KeySymbol};

const SELECT_CONTROLS: [ControlDescription; 4] = [
    ("Up/Down", "Select"),
    ("Enter", "Edit"),
    ("+", "Add"),
    ("-", "Remove"),
];
const EDIT_CONTROLS: [ControlDescription; 3] =
    [("Enter", "Commit"), ("Backspace", "Delete"), ("Esc", "Cancel")];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquationEditor {
    selected: usize,
    /// Text being typed into the selected line.
    editing: Option<String>,
}

impl EquationEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn current_action_description(&self) -> &'static str {
        if self.is_editing() {
            "Editing"
        } else {
            "Selecting"
        }
    }

    pub fn control_descriptions(&self) -> Vec<ControlDescription> {
        if self.is_editing() {
            EDIT_CONTROLS.to_vec()
        } else {
            SELECT_CONTROLS.to_vec()
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> bool {
        // The selection may point past the end if the list shrank elsewhere.
        self.selected = self.selected.min(state.len().saturating_sub(1));
        if let Some(buffer) = self.editing.as_mut() {
            match key.symbol {
                KeySymbol::Enter => {
                    let text = std::mem::take(buffer);
                    self.editing = None;
                    debug!("EquationEditor: commit {:?} to line {}", text, self.selected + 1);
                    state.set_equation(self.selected, text);
                }
                KeySymbol::Escape => {
                    debug!("EquationEditor: edit of line {} cancelled", self.selected + 1);
                    self.editing = None;
                }
                KeySymbol::Backspace => {
                    buffer.pop();
                }
                KeySymbol::Delete => buffer.clear(),
                _ => match key.text() {
                    Some(c) => buffer.push(c),
                    None => return false,
                },
            }
            return true;
        }

        let count = state.len();
        match key.symbol {
            KeySymbol::Up => self.selected = (self.selected + count - 1) % count,
            KeySymbol::Down => self.selected = (self.selected + 1) % count,
            KeySymbol::Home => self.selected = 0,
            KeySymbol::End => self.selected = count - 1,
            KeySymbol::Enter => {
                self.editing = Some(state.entries()[self.selected].text.clone());
            }
            KeySymbol::Char('+') => self.selected = state.insert_after(self.selected),
            KeySymbol::Char('-') | KeySymbol::Delete => {
                state.remove(self.selected);
                self.selected = self.selected.min(state.len() - 1);
            }
            _ => return false,
        }
        true
    }

    /// One line per equation: `n.` then the centred text.
    ///
    /// The list scrolls so the selected line stays visible.
    pub fn draw(
        &self,
        display: &mut dyn Display,
        ctx: &FrameContext<'_>,
        focused: bool,
    ) -> anyhow::Result<()> {
        let area = ctx.layout.editor;
        if area.is_empty() {
            return Ok(());
        }
        let colors = &ctx.appearance.colors;
        let (fg, bg) = (colors.graph_foreground, colors.graph_background);
        display.draw_rectangle(area.x, area.y, area.width, area.height, bg)?;

        let first = (self.selected + 1).saturating_sub(area.height);
        let entries = ctx.state.entries();
        for (row, index) in (first..entries.len()).take(area.height).enumerate() {
            let y = area.y + row;
            let highlighted = focused && index == self.selected;
            let (line_fg, line_bg) = if highlighted { (bg, fg) } else { (fg, bg) };
            let prefix_fg = if entries[index].error().is_some() {
                colors.error_foreground
            } else {
                line_fg
            };

            let prefix = truncate(&format!("{}.", index + 1), area.width);
            let prefix_len = prefix.chars().count();
            display.draw_text(area.x, y, &prefix, prefix_fg, line_bg)?;

            let rest = area.width - prefix_len;
            if rest == 0 {
                continue;
            }
            let text = match (&self.editing, index == self.selected) {
                (Some(buffer), true) => format!("{}_", buffer),
                _ => entries[index].text.clone(),
            };
            display.draw_centered_text(
                area.x + prefix_len,
                y,
                rest,
                1,
                &truncate(&text, rest),
                line_fg,
                line_bg,
            )?;
        }
        Ok(())
    }
}
