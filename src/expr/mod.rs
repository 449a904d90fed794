// src/expr/mod.rs

//! The relation language: a small arithmetic grammar over `x` and `y`
//! interpreted by a pure evaluator.
//!
//! Parse errors (malformed relations) are reported once when the text is
//! parsed; evaluation errors (points where a well-formed relation is
//! undefined) are reported per sample and masked by the sampler.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod relation;


pub use ast::{BinaryOp, Expr, Function, Variable};
pub use parser::parse;
pub use relation::{Equation, Relation};
