// src/expr/relation.rs

//! Equations as typed by the user and the relations parsed from them.

use std::fmt;

use log::debug;

use super::ast::Expr;
use super::parser::parse;
use crate::error::{EvalError, ParseError};
use crate::raster::Predicate;

/// The text of one equation, `lhs = rhs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equation {
    pub lhs: String,
    pub rhs: String,
}

impl Equation {
    pub fn new(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Splits `lhs=rhs` at its only `=`. Surrounding whitespace is trimmed.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let mut parts = text.split('=');
        let lhs = parts.next().unwrap_or_default();
        let rhs = parts.next().ok_or(ParseError::MissingEquals)?;
        if parts.next().is_some() {
            return Err(ParseError::MultipleEquals);
        }
        Ok(Self::new(lhs.trim(), rhs.trim()))
    }

    pub fn is_empty(&self) -> bool {
        self.lhs.trim().is_empty() && self.rhs.trim().is_empty()
    }

    /// Parses both sides.
    pub fn parse(&self) -> Result<Relation, ParseError> {
        Relation::parse(&self.lhs, &self.rhs)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.lhs, self.rhs)
    }
}

/// A relation `lhs(x, y) >= rhs(x, y)` ready for sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    source: String,
    lhs: Expr,
    rhs: Expr,
}

impl Relation {
    /// Parses both sides; an error in `rhs` reports positions within `rhs`.
    pub fn parse(lhs: &str, rhs: &str) -> Result<Self, ParseError> {
        let source = format!("{}={}", lhs, rhs);
        let parsed = Self {
            lhs: parse(lhs)?,
            rhs: parse(rhs)?,
            source,
        };
        debug!("Relation: parsed {:?} as {} >= {}", parsed.source, parsed.lhs, parsed.rhs);
        Ok(parsed)
    }

    /// Parses `lhs=rhs` text.
    pub fn from_equation(text: &str) -> Result<Self, ParseError> {
        Equation::from_text(text)?.parse()
    }

    /// The `lhs=rhs` text the relation was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Predicate for Relation {
    fn holds(&self, x: f64, y: f64) -> Result<bool, EvalError> {
        Ok(self.lhs.eval(x, y)? >= self.rhs.eval(x, y)?)
    }
}
