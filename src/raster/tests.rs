// src/raster/tests.rs

use std::cell::Cell;

use test_log::test;

use super::*;
use crate::error::{EvalError, RenderError};

fn relation(f: impl Fn(f64, f64) -> bool) -> impl Fn(f64, f64) -> Result<bool, EvalError> {
    move |x, y| Ok(f(x, y))
}

fn unit_square() -> Viewport {
    Viewport::new(-1.0, 1.0, 1.0, -1.0)
}

#[test]
fn mapper_aligns_padded_index_one_with_the_viewport_corner() {
    let mapper = ViewportMapper::new(unit_square(), CanvasSize::new(3, 3)).unwrap();
    assert_eq!(mapper.pixel_to_world(1, 1), (-1.0, 1.0));
    assert_eq!(mapper.pixel_to_world(3, 3), (1.0, -1.0));
    assert_eq!(mapper.pixel_to_world(0, 0), (-2.0, 2.0));
    assert_eq!(mapper.pixel_to_world(4, 2), (2.0, 0.0));
}

#[test]
fn mapper_steps_divide_by_size_minus_one() {
    let viewport = Viewport::new(0.0, 10.0, 4.0, 0.0);
    let mapper = ViewportMapper::new(viewport, CanvasSize::new(11, 5)).unwrap();
    assert_eq!(mapper.step(), (1.0, 1.0));
}

#[test]
fn degenerate_canvas_is_rejected() {
    let a = relation(|x, _| x >= 0.0);
    let relations: [&dyn Predicate; 1] = [&a];
    for canvas in [CanvasSize::new(1, 5), CanvasSize::new(5, 1), CanvasSize::new(0, 0)] {
        let result = render(&relations, unit_square(), canvas);
        assert!(
            matches!(result, Err(RenderError::InvalidConfiguration(_))),
            "{:?} should be rejected",
            canvas
        );
    }
}

#[test]
fn inverted_viewport_is_rejected() {
    let canvas = CanvasSize::new(4, 4);
    let inverted_x = Viewport::new(1.0, -1.0, 1.0, -1.0);
    let inverted_y = Viewport::new(-1.0, 1.0, -1.0, 1.0);
    let flat = Viewport::new(0.0, 0.0, 1.0, -1.0);
    let nan = Viewport::new(f64::NAN, 1.0, 1.0, -1.0);
    for viewport in [inverted_x, inverted_y, flat, nan] {
        assert!(matches!(
            render(&[], viewport, canvas),
            Err(RenderError::InvalidConfiguration(_))
        ));
    }
}

#[test]
fn invalid_configuration_fails_before_sampling() {
    let calls = Cell::new(0usize);
    let counting = |_x: f64, _y: f64| -> Result<bool, EvalError> {
        calls.set(calls.get() + 1);
        Ok(true)
    };
    let relations: [&dyn Predicate; 1] = [&counting];
    let _ = render(&relations, unit_square(), CanvasSize::new(1, 1));
    assert_eq!(calls.get(), 0);
}

#[test]
fn every_padded_cell_is_sampled_once() {
    let calls = Cell::new(0usize);
    let counting = |_x: f64, _y: f64| -> Result<bool, EvalError> {
        calls.set(calls.get() + 1);
        Ok(false)
    };
    let relations: [&dyn Predicate; 1] = [&counting];
    render(&relations, unit_square(), CanvasSize::new(7, 4)).unwrap();
    assert_eq!(calls.get(), 9 * 6);
}

#[test]
fn empty_relation_list_renders_blank_grid() {
    let grid = render(&[], unit_square(), CanvasSize::new(5, 3)).unwrap();
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.marked_count(), 0);
    for row in grid.rows() {
        assert_eq!(row, vec![' '; 5]);
    }
}

#[test]
fn half_plane_scenario() {
    // World x of the padded columns is -2, -1, 0, 1, 2.
    let a = relation(|x, _| x >= 0.0);
    let relations: [&dyn Predicate; 1] = [&a];
    let grid = render(&relations, unit_square(), CanvasSize::new(3, 3)).unwrap();
    for y in 0..3 {
        assert_eq!(grid.row(y), vec![' ', '#', ' ']);
    }
}

#[test]
fn disjoint_relations_compose_as_pixelwise_or() {
    let viewport = Viewport::new(-10.0, 10.0, 10.0, -10.0);
    let canvas = CanvasSize::new(21, 11);
    let right = relation(|x, _| x >= 5.0);
    let left = relation(|x, _| x <= -5.0);

    let only_right: [&dyn Predicate; 1] = [&right];
    let only_left: [&dyn Predicate; 1] = [&left];
    let both: [&dyn Predicate; 2] = [&right, &left];

    let grid_right = render(&only_right, viewport, canvas).unwrap();
    let grid_left = render(&only_left, viewport, canvas).unwrap();
    let combined = render(&both, viewport, canvas).unwrap();

    assert!(grid_right.marked_count() > 0);
    assert!(grid_left.marked_count() > 0);
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            assert_eq!(
                combined.is_marked(x, y),
                grid_right.is_marked(x, y) || grid_left.is_marked(x, y),
                "mismatch at ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn relation_order_does_not_change_the_output() {
    let viewport = Viewport::new(-5.0, 5.0, 5.0, -5.0);
    let canvas = CanvasSize::new(30, 15);
    let circle = relation(|x, y| x * x + y * y <= 9.0);
    let parabola = relation(|x, y| y >= x * x - 4.0);
    let line = relation(|x, y| y >= 0.5 * x);

    let forward: [&dyn Predicate; 3] = [&circle, &parabola, &line];
    let backward: [&dyn Predicate; 3] = [&line, &parabola, &circle];
    assert_eq!(
        render(&forward, viewport, canvas).unwrap(),
        render(&backward, viewport, canvas).unwrap()
    );
}

#[test]
fn rendering_is_idempotent() {
    let viewport = Viewport::new(-3.0, 4.0, 2.5, -1.5);
    let canvas = CanvasSize::new(40, 12);
    let wave = relation(|x, y| y >= x.sin());
    let relations: [&dyn Predicate; 1] = [&wave];
    let first = render(&relations, viewport, canvas).unwrap();
    let second = render(&relations, viewport, canvas).unwrap();
    assert_eq!(first, second);
    assert!(first.marked_count() > 0);
}

#[test]
fn every_mark_satisfies_its_relation() {
    let viewport = Viewport::new(-6.0, 6.0, 6.0, -6.0);
    let canvas = CanvasSize::new(37, 19);
    let disc = |x: f64, y: f64| x * x + y * y <= 16.0;
    let a = relation(disc);
    let relations: [&dyn Predicate; 1] = [&a];
    let grid = render(&relations, viewport, canvas).unwrap();
    let mapper = ViewportMapper::new(viewport, canvas).unwrap();

    assert!(grid.marked_count() > 0);
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            if grid.is_marked(x, y) {
                let (wx, wy) = mapper.pixel_to_world(x + 1, y + 1);
                assert!(disc(wx, wy), "mark at ({}, {}) lies outside the disc", x, y);
            }
        }
    }
}

#[test]
fn disc_interior_is_not_drawn() {
    let viewport = Viewport::new(-6.0, 6.0, 6.0, -6.0);
    let canvas = CanvasSize::new(13, 13);
    let a = relation(|x, y| x * x + y * y <= 16.0);
    let relations: [&dyn Predicate; 1] = [&a];
    let grid = render(&relations, viewport, canvas).unwrap();
    // Canvas centre is world (0, 0).
    assert!(!grid.is_marked(6, 6));
    // World (4, 0) sits on the circle.
    assert!(grid.is_marked(10, 6));
    assert!(grid.is_marked(2, 6));
}

#[test]
fn relation_undefined_everywhere_renders_blank() {
    let undefined = |_x: f64, _y: f64| -> Result<bool, EvalError> { Err(EvalError::DivisionByZero) };
    let relations: [&dyn Predicate; 1] = [&undefined];
    let grid = render(&relations, unit_square(), CanvasSize::new(6, 4)).unwrap();
    assert_eq!(grid.marked_count(), 0);
}

#[test]
fn failed_samples_are_masked_and_counted() {
    let mapper = ViewportMapper::new(unit_square(), CanvasSize::new(3, 3)).unwrap();
    let sampler = GridSampler::new(mapper, 5, 5);
    let partial = |x: f64, _y: f64| -> Result<bool, EvalError> {
        if x < 0.0 {
            Err(EvalError::Domain { function: "sqrt" })
        } else {
            Ok(true)
        }
    };
    let field = sampler.sample(&partial);
    assert_eq!(field.masked_samples(), 2 * 5);
    assert_eq!(field.get(0, 0), Some(false));
    assert_eq!(field.get(2, 0), Some(true));
    assert_eq!(field.get(5, 0), None);
    assert_eq!(field.get(-1, 0), None);
}

#[test]
fn boundary_at_the_viewport_edge_is_visible() {
    // The true region ends exactly at the right edge; the padding column
    // beyond it is false, so the last visible column is drawn.
    let a = relation(|x, _| (0.0..=1.0).contains(&x));
    let relations: [&dyn Predicate; 1] = [&a];
    let grid = render(&relations, unit_square(), CanvasSize::new(3, 3)).unwrap();
    for y in 0..3 {
        assert_eq!(grid.row_string(y), " ##");
    }
}

#[test]
fn padding_column_zero_is_a_real_neighbour() {
    // Padded column 0 sits at x = -2, where the relation fails, so the
    // first visible column is a boundary.
    let a = relation(|x, _| x >= -1.0);
    let relations: [&dyn Predicate; 1] = [&a];
    let grid = render(&relations, unit_square(), CanvasSize::new(3, 3)).unwrap();
    for y in 0..3 {
        assert_eq!(grid.row_string(y), "#  ");
    }
}

#[test]
fn custom_symbols_are_used() {
    let a = relation(|x, _| x >= 0.0);
    let relations: [&dyn Predicate; 1] = [&a];
    let symbols = Symbols { mark: '*', blank: '.' };
    let grid = render_with_symbols(&relations, unit_square(), CanvasSize::new(3, 2), symbols).unwrap();
    assert_eq!(grid.to_string(), ".*.\n.*.");
}

#[test]
fn viewport_pan_and_zoom_keep_invariants() {
    let viewport = Viewport::new(-10.0, 10.0, 10.0, -10.0);
    let panned = viewport.panned(0.1, -0.1);
    assert_eq!(panned, Viewport::new(-8.0, 12.0, 8.0, -12.0));

    let zoomed = viewport.zoomed(2.0).unwrap();
    assert_eq!(zoomed, Viewport::new(-5.0, 5.0, 5.0, -5.0));
    assert!(zoomed.validate().is_ok());

    assert!(viewport.zoomed(0.0).is_none());
    assert!(viewport.zoomed(-1.0).is_none());
    assert!(viewport.zoomed(f64::INFINITY).is_none());
}
