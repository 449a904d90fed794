// src/orchestrator/tests.rs

use super::*;
use crate::color::NamedColor;
use crate::config::Config;
use crate::display::CellBuffer;
use crate::keys::{KeyEvent, KeySymbol, Modifiers};
use crate::raster::Viewport;
use test_log::test;

fn config_with(equations: &[&str]) -> Config {
    let mut config = Config::default();
    config.equations.0 = equations.iter().map(|s| s.to_string()).collect();
    config.appearance.editor_width = 12;
    config.viewport.initial = Viewport::new(-4.0, 4.0, 4.0, -4.0);
    config
}

fn press(orchestrator: &mut AppOrchestrator, keys: &[KeyEvent]) -> OrchestratorStatus {
    let mut status = OrchestratorStatus::Running;
    for key in keys {
        status = orchestrator.handle_key(*key);
    }
    status
}

fn type_text(orchestrator: &mut AppOrchestrator, text: &str) {
    for c in text.chars() {
        assert_eq!(orchestrator.handle_key(KeyEvent::char(c)), OrchestratorStatus::Running);
    }
}

fn key(symbol: KeySymbol) -> KeyEvent {
    KeyEvent::new(symbol)
}

fn viewer_viewport(orchestrator: &AppOrchestrator) -> Viewport {
    match &orchestrator.widgets()[0] {
        Widget::GraphViewer(viewer) => viewer.viewport(),
        _ => panic!("first widget should be the graph viewer"),
    }
}

#[test]
fn test_starts_focused_on_the_graph() {
    let orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    assert_eq!(orchestrator.focused_name(), "Pan");
    assert_eq!(orchestrator.state().relations().count(), 1);
}

#[test]
fn test_q_and_ctrl_c_shut_down() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    assert_eq!(
        orchestrator.handle_key(KeyEvent::char('q')),
        OrchestratorStatus::Shutdown
    );
    let ctrl_c = KeyEvent::with_modifiers(KeySymbol::Char('c'), Modifiers::CONTROL);
    assert_eq!(orchestrator.handle_key(ctrl_c), OrchestratorStatus::Shutdown);
}

#[test]
fn test_tab_cycles_between_focusable_widgets() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    press(&mut orchestrator, &[key(KeySymbol::Tab)]);
    assert_eq!(orchestrator.focused_name(), "Edit");
    press(&mut orchestrator, &[key(KeySymbol::Tab)]);
    assert_eq!(orchestrator.focused_name(), "Pan");
}

#[test]
fn test_arrow_keys_pan_the_graph() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    press(&mut orchestrator, &[key(KeySymbol::Right), key(KeySymbol::Up)]);
    let viewport = viewer_viewport(&orchestrator);
    assert!((viewport.left - -3.2).abs() < 1e-9);
    assert!((viewport.right - 4.8).abs() < 1e-9);
    assert!((viewport.top - 4.8).abs() < 1e-9);
    assert!((viewport.bottom - -3.2).abs() < 1e-9);

    press(&mut orchestrator, &[KeyEvent::char('0')]);
    assert_eq!(viewer_viewport(&orchestrator), Viewport::new(-4.0, 4.0, 4.0, -4.0));
}

#[test]
fn test_zoom_keys() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    press(&mut orchestrator, &[KeyEvent::char('+')]);
    assert_eq!(viewer_viewport(&orchestrator), Viewport::new(-2.0, 2.0, 2.0, -2.0));
    press(&mut orchestrator, &[KeyEvent::char('-'), KeyEvent::char('-')]);
    assert_eq!(viewer_viewport(&orchestrator), Viewport::new(-8.0, 8.0, 8.0, -8.0));
}

#[test]
fn test_editing_an_equation_reparses_it() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    press(&mut orchestrator, &[key(KeySymbol::Tab), key(KeySymbol::Enter)]);
    // While editing, q and Tab are text, not commands.
    type_text(&mut orchestrator, "^2");
    assert_eq!(
        orchestrator.handle_key(KeyEvent::char('q')),
        OrchestratorStatus::Running
    );
    press(&mut orchestrator, &[key(KeySymbol::Backspace), key(KeySymbol::Enter)]);

    let entry = &orchestrator.state().entries()[0];
    assert_eq!(entry.text, "y=x^2");
    assert!(matches!(entry.relation, Some(Ok(_))));
    assert_eq!(orchestrator.state().diagnostic(), None);
    assert_eq!(orchestrator.focused_name(), "Edit");
}

#[test]
fn test_escape_cancels_an_edit() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    press(&mut orchestrator, &[key(KeySymbol::Tab), key(KeySymbol::Enter)]);
    type_text(&mut orchestrator, "+1");
    press(&mut orchestrator, &[key(KeySymbol::Escape)]);
    assert_eq!(orchestrator.state().entries()[0].text, "y=x");
}

#[test]
fn test_parse_errors_become_the_diagnostic() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    press(
        &mut orchestrator,
        &[key(KeySymbol::Tab), KeyEvent::char('+'), key(KeySymbol::Enter)],
    );
    type_text(&mut orchestrator, "y=x+");
    press(&mut orchestrator, &[key(KeySymbol::Enter)]);

    let state = orchestrator.state();
    assert_eq!(state.len(), 2);
    assert!(state.entries()[1].error().is_some());
    assert_eq!(
        state.diagnostic(),
        Some("Equation 2: expression ends unexpectedly at 2")
    );
    // The broken equation does not stop the others from rendering.
    assert_eq!(state.relations().count(), 1);
}

#[test]
fn test_removing_the_last_equation_blanks_it() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    press(&mut orchestrator, &[key(KeySymbol::Tab), KeyEvent::char('-')]);
    let state = orchestrator.state();
    assert_eq!(state.len(), 1);
    assert_eq!(state.entries()[0].text, "");
    assert_eq!(state.relations().count(), 0);
}

#[test]
fn test_selection_wraps() {
    let mut orchestrator = AppOrchestrator::new(&config_with(&["y=x", "y=1", "x=1"]));
    press(&mut orchestrator, &[key(KeySymbol::Tab), key(KeySymbol::Up)]);
    match &orchestrator.widgets()[1] {
        Widget::EquationEditor(editor) => assert_eq!(editor.selected(), 2),
        _ => panic!("second widget should be the editor"),
    }
    press(&mut orchestrator, &[key(KeySymbol::Down)]);
    match &orchestrator.widgets()[1] {
        Widget::EquationEditor(editor) => assert_eq!(editor.selected(), 0),
        _ => panic!("second widget should be the editor"),
    }
}

#[test]
fn test_draw_frame_lays_out_all_widgets() {
    let mut config = config_with(&["x=0"]);
    config.appearance.title = "Graph".to_string();
    let orchestrator = AppOrchestrator::new(&config);
    let mut display = CellBuffer::new(33, 8);
    orchestrator.draw_frame(&mut display).unwrap();

    // Title: centred, black on white.
    assert_eq!(display.row_text(0).trim(), "Graph");
    let title = display.cell(14, 0).unwrap();
    assert_eq!(
        (title.ch, title.fg, title.bg),
        ('G', NamedColor::Black, NamedColor::White)
    );

    // Editor: numbered line.
    assert!(display.row_text(1).starts_with("1."));
    assert!(display.row_text(1)[..12].contains("x=0"));

    // Canvas: 21 columns spanning x in [-4, 4]; x = 0 is column 10 of the
    // canvas, which starts after the 12-column editor.
    for y in 1..7 {
        assert_eq!(display.cell(12 + 10, y).map(|c| c.ch), Some('#'));
        assert_eq!(display.cell(12 + 5, y).map(|c| c.ch), Some(' '));
    }

    // Status bar: focus names, then the viewer's controls.
    let status = display.row_text(7);
    assert!(status.starts_with(" Pan  Edit "));
    assert!(status[12..].starts_with("Panning:"));
    let pan = display.cell(1, 7).unwrap();
    assert_eq!((pan.fg, pan.bg), (NamedColor::White, NamedColor::Black));
}

#[test]
fn test_draw_frame_on_a_tiny_display() {
    let orchestrator = AppOrchestrator::new(&config_with(&["y=x"]));
    for (cols, rows) in [(0, 0), (1, 1), (13, 3), (5, 2)] {
        let mut display = CellBuffer::new(cols, rows);
        orchestrator.draw_frame(&mut display).unwrap();
    }
}
