// src/error.rs

//! Typed errors for the rasterization engine, the expression language and
//! the display sink.
//!
//! Application plumbing (`main`, the orchestrator, console I/O) wraps these in
//! `anyhow::Error` with context; the library-level code returns them directly
//! so callers can tell the failure classes apart.

use thiserror::Error;

/// A render request that cannot be sampled.
///
/// Raised before any predicate is evaluated, never coerced into a smaller or
/// larger canvas.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// A relation could not be evaluated at one sample point.
///
/// The sampler downgrades these to "relation does not hold here".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("argument outside the domain of `{function}`")]
    Domain { function: &'static str },
    #[error("result is not a finite number")]
    NonFinite,
}

/// A relation's text is malformed.
///
/// Reported once per equation when it is entered, never per sample.
/// Positions are character offsets into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: usize },
    #[error("unexpected '{token}' at {position}")]
    UnexpectedToken { token: String, position: usize },
    #[error("expression ends unexpectedly at {position}")]
    UnexpectedEnd { position: usize },
    #[error("unknown name '{name}' at {position}")]
    UnknownIdentifier { name: String, position: usize },
    #[error("invalid number '{text}' at {position}")]
    InvalidNumber { text: String, position: usize },
    #[error("empty expression")]
    EmptyExpression,
    #[error("equation has no '='")]
    MissingEquals,
    #[error("equation has more than one '='")]
    MultipleEquals,
}

/// A drawing request the display cannot honour.
///
/// The sink fails fast rather than wrapping or clipping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error(
        "area {width}x{height} at ({x},{y}) overruns the {cols}x{rows} display"
    )]
    Overflow {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        cols: usize,
        rows: usize,
    },
    #[error("text {0:?} contains a newline")]
    InvalidText(String),
    #[error("text {text:?} is wider than the {width} columns available")]
    TextTooWide { text: String, width: usize },
}
