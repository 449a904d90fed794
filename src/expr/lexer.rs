// src/expr/lexer.rs

//! Relation text lexer.
//! Converts a string into `Token`s, tracking the character position of each
//! token so parse errors can point at the offending input.

use log::trace;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl TokenKind {
    /// Source-like spelling, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
            TokenKind::Caret => "^".to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
            TokenKind::Comma => ",".to_string(),
        }
    }
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    #[inline]
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
        let start = self.position;
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        let kind = match c {
            '0'..='9' | '.' => self.lex_number(start)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(),
            _ => {
                self.bump();
                match c {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '^' => TokenKind::Caret,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    ',' => TokenKind::Comma,
                    other => {
                        return Err(ParseError::UnexpectedCharacter {
                            ch: other,
                            position: start,
                        })
                    }
                }
            }
        };
        Ok(Some(Token {
            kind,
            position: start,
        }))
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(d) = self.peek().filter(char::is_ascii_digit) {
            text.push(d);
            self.bump();
        }
    }

    /// Digits with an optional fraction and exponent. An `e` only starts an
    /// exponent when a digit (optionally signed) follows it, so `2e` stays
    /// "two times e".
    fn lex_number(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        let mut text = String::new();
        self.take_digits(&mut text);
        if self.peek() == Some('.') {
            text.push('.');
            self.bump();
            self.take_digits(&mut text);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            let exponent_follows = match lookahead.next() {
                Some(d) if d.is_ascii_digit() => true,
                Some('+' | '-') => matches!(lookahead.next(), Some(d) if d.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                text.push('e');
                self.bump();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    text.push(sign);
                    self.bump();
                }
                self.take_digits(&mut text);
            }
        }

        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ParseError::InvalidNumber {
                text,
                position: start,
            })
    }

    fn lex_ident(&mut self) -> TokenKind {
        let mut name = String::new();
        while let Some(c) = self
            .peek()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        {
            name.push(c);
            self.bump();
        }
        TokenKind::Ident(name)
    }
}

/// Splits `input` into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    trace!("tokenize: {:?} -> {} tokens", input, tokens.len());
    Ok(tokens)
}
