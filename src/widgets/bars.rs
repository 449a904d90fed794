// src/widgets/bars.rs

//! Title and status bars.

use super::{truncate, FrameContext, GLOBAL_CONTROLS};
use crate::display::Display;

pub fn draw_title(display: &mut dyn Display, ctx: &FrameContext<'_>) -> anyhow::Result<()> {
    let area = ctx.layout.title;
    if area.is_empty() {
        return Ok(());
    }
    let colors = &ctx.appearance.colors;
    display.draw_centered_text(
        area.x,
        area.y,
        area.width,
        area.height,
        &truncate(&ctx.appearance.title, area.width),
        colors.panel_foreground,
        colors.panel_background,
    )?;
    Ok(())
}

/// Focus names on the left, the focused widget's controls and the latest
/// diagnostic from the editor's right edge onwards.
pub fn draw_status(display: &mut dyn Display, ctx: &FrameContext<'_>) -> anyhow::Result<()> {
    let area = ctx.layout.status;
    if area.is_empty() {
        return Ok(());
    }
    let colors = &ctx.appearance.colors;
    let (fg, bg) = (colors.panel_foreground, colors.panel_background);
    display.draw_rectangle(area.x, area.y, area.width, area.height, bg)?;

    let split = ctx.appearance.editor_width.min(area.width);
    let mut x = area.x;
    for (i, name) in ctx.focus_names.iter().enumerate() {
        let label = truncate(&format!(" {} ", name), split - (x - area.x));
        if label.is_empty() {
            break;
        }
        let (label_fg, label_bg) = if i == ctx.focused { (bg, fg) } else { (fg, bg) };
        display.draw_text(x, area.y, &label, label_fg, label_bg)?;
        x += label.chars().count();
    }

    let mut text = format!("{}:", ctx.action);
    for (key, description) in ctx.controls.iter().chain(GLOBAL_CONTROLS.iter()) {
        text.push_str(&format!(" {} {} ", key, description));
    }
    if let Some(diagnostic) = ctx.state.diagnostic() {
        text.push_str(&format!("| {}", diagnostic));
    }
    let text = truncate(&text, area.width - split);
    display.draw_text(area.x + split, area.y, &text, fg, bg)?;
    Ok(())
}
