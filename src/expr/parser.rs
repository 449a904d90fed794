// src/expr/parser.rs

//! Recursive-descent parser producing an `Expr` from tokens.
//!
//! Precedence, lowest first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary | implicit)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := number | name | name '(' expr ')' | '(' expr ')'
//! ```
//!
//! `implicit` is a `power` that directly follows a factor and starts with a
//! name or `(`, so `2x`, `3(x + 1)` and `(x + 1)(x - 1)` are products.

use log::trace;

use super::ast::{BinaryOp, Expr, Function, Variable};
use super::lexer::{tokenize, Token, TokenKind};
use crate::error::ParseError;

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    /// Character length of the input, reported for errors at the end.
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.index).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn unexpected(&self) -> ParseError {
        match self.tokens.get(self.index) {
            Some(token) => ParseError::UnexpectedToken {
                token: token.kind.describe(),
                position: token.position,
            },
            None => ParseError::UnexpectedEnd { position: self.end },
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if self.peek() == Some(&TokenKind::RParen) {
            self.index += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.index += 1;
            let rhs = self.parse_term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(TokenKind::Star) => {
                    self.index += 1;
                    let rhs = self.parse_unary()?;
                    lhs = Expr::binary(BinaryOp::Mul, lhs, rhs);
                }
                Some(TokenKind::Slash) => {
                    self.index += 1;
                    let rhs = self.parse_unary()?;
                    lhs = Expr::binary(BinaryOp::Div, lhs, rhs);
                }
                Some(TokenKind::Ident(_)) | Some(TokenKind::LParen) => {
                    let rhs = self.parse_power()?;
                    lhs = Expr::binary(BinaryOp::Mul, lhs, rhs);
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                self.index += 1;
                Ok(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            Some(TokenKind::Plus) => {
                self.index += 1;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;
        if self.peek() == Some(&TokenKind::Caret) {
            self.index += 1;
            let exponent = self.parse_unary()?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = match self.advance() {
            Some(token) => token,
            None => return Err(ParseError::UnexpectedEnd { position: self.end }),
        };
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            TokenKind::Ident(name) => self.parse_name(name, token.position),
            other => Err(ParseError::UnexpectedToken {
                token: other.describe(),
                position: token.position,
            }),
        }
    }

    fn parse_name(&mut self, name: String, position: usize) -> Result<Expr, ParseError> {
        match name.as_str() {
            "x" => return Ok(Expr::Variable(Variable::X)),
            "y" => return Ok(Expr::Variable(Variable::Y)),
            "pi" => return Ok(Expr::Number(std::f64::consts::PI)),
            "e" => return Ok(Expr::Number(std::f64::consts::E)),
            _ => {}
        }
        let function =
            Function::from_name(&name).ok_or(ParseError::UnknownIdentifier { name, position })?;
        if self.peek() != Some(&TokenKind::LParen) {
            return Err(self.unexpected());
        }
        self.index += 1;
        let arg = self.parse_expr()?;
        self.expect_rparen()?;
        Ok(Expr::Call {
            function,
            arg: Box::new(arg),
        })
    }
}

/// Parses one side of a relation.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        end: input.chars().count(),
    };
    let expr = parser.parse_expr()?;
    if parser.index < parser.tokens.len() {
        return Err(parser.unexpected());
    }
    trace!("parse: {:?} -> {}", input, expr);
    Ok(expr)
}
