// src/keys.rs

//! Key symbols, modifiers and decoding of raw console input bytes.

use bitflags::bitflags;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

const ESC: char = '\x1b';
const DEL: char = '\x7f';
const BS: char = '\x08';
const CTRL_C: char = '\x03';

bitflags! {
    /// Represents a keyboard modifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// Represents a key symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeySymbol {
    Char(char),

    // Navigation keys
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Delete,

    // Other common keys
    Enter,
    Backspace,
    Tab,
    Escape,

    #[default]
    Unknown,
}

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyEvent {
    pub symbol: KeySymbol,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(symbol: KeySymbol) -> Self {
        Self {
            symbol,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(symbol: KeySymbol, modifiers: Modifiers) -> Self {
        Self { symbol, modifiers }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeySymbol::Char(c))
    }

    /// True for Ctrl-C, which always ends the program.
    pub fn is_interrupt(&self) -> bool {
        self.symbol == KeySymbol::Char('c') && self.modifiers.contains(Modifiers::CONTROL)
    }

    /// The character to insert for this key, if it is plain text.
    pub fn text(&self) -> Option<char> {
        match self.symbol {
            KeySymbol::Char(c) if !self.modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT) => {
                Some(c)
            }
            _ => None,
        }
    }
}

impl From<KeySymbol> for KeyEvent {
    fn from(symbol: KeySymbol) -> Self {
        KeyEvent::new(symbol)
    }
}

/// Decodes one read's worth of console input into key events.
///
/// Recognizes CSI and SS3 cursor keys (`ESC [ A`, `ESC O A`), `ESC [ 3 ~`
/// (Delete), Alt-prefixed characters and C0 control characters. A lone `ESC`
/// at the end of the input is the Escape key. Invalid UTF-8 is replaced with
/// U+FFFD. Sequences split across two reads are not reassembled.
pub fn decode_keys(bytes: &[u8]) -> Vec<KeyEvent> {
    let text = String::from_utf8_lossy(bytes);
    let mut chars = text.chars().peekable();
    let mut keys = Vec::new();

    while let Some(c) = chars.next() {
        let key = match c {
            ESC => match chars.peek().copied() {
                None => KeyEvent::new(KeySymbol::Escape),
                Some('[') | Some('O') => {
                    chars.next();
                    decode_escape_sequence(&mut chars)
                }
                Some(next) => {
                    chars.next();
                    let mut key = decode_char(next);
                    key.modifiers |= Modifiers::ALT;
                    key
                }
            },
            c => decode_char(c),
        };
        trace!("decode_keys: {:?}", key);
        keys.push(key);
    }
    keys
}

fn decode_char(c: char) -> KeyEvent {
    match c {
        '\t' => KeyEvent::new(KeySymbol::Tab),
        '\r' | '\n' => KeyEvent::new(KeySymbol::Enter),
        DEL | BS => KeyEvent::new(KeySymbol::Backspace),
        ESC => KeyEvent::new(KeySymbol::Escape),
        CTRL_C => KeyEvent::with_modifiers(KeySymbol::Char('c'), Modifiers::CONTROL),
        '\x01'..='\x1a' => {
            let letter = (b'a' + (c as u8 - 1)) as char;
            KeyEvent::with_modifiers(KeySymbol::Char(letter), Modifiers::CONTROL)
        }
        c if c.is_control() => KeyEvent::new(KeySymbol::Unknown),
        c => KeyEvent::char(c),
    }
}

/// Decodes the remainder of a CSI / SS3 sequence, after `ESC [` or `ESC O`.
fn decode_escape_sequence(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> KeyEvent {
    let mut params = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == ';' {
            params.push(c);
            chars.next();
        } else {
            break;
        }
    }
    let symbol = match (chars.next(), params.as_str()) {
        (Some('A'), _) => KeySymbol::Up,
        (Some('B'), _) => KeySymbol::Down,
        (Some('C'), _) => KeySymbol::Right,
        (Some('D'), _) => KeySymbol::Left,
        (Some('H'), _) => KeySymbol::Home,
        (Some('F'), _) => KeySymbol::End,
        (Some('~'), "1") | (Some('~'), "7") => KeySymbol::Home,
        (Some('~'), "4") | (Some('~'), "8") => KeySymbol::End,
        (Some('~'), "3") => KeySymbol::Delete,
        (other, _) => {
            warn!(
                "decode_keys: unsupported escape sequence (params {:?}, final {:?})",
                params, other
            );
            KeySymbol::Unknown
        }
    };
    KeyEvent::new(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn it_should_decode_printable_characters() {
        assert_eq!(
            decode_keys(b"x+2"),
            vec![KeyEvent::char('x'), KeyEvent::char('+'), KeyEvent::char('2')]
        );
    }

    #[test]
    fn it_should_decode_cursor_keys_in_both_modes() {
        assert_eq!(
            decode_keys(b"\x1b[A\x1b[B\x1bOC\x1bOD"),
            vec![
                KeyEvent::new(KeySymbol::Up),
                KeyEvent::new(KeySymbol::Down),
                KeyEvent::new(KeySymbol::Right),
                KeyEvent::new(KeySymbol::Left),
            ]
        );
    }

    #[test]
    fn it_should_decode_editing_keys() {
        assert_eq!(
            decode_keys(b"\t\r\x7f\x1b[3~"),
            vec![
                KeyEvent::new(KeySymbol::Tab),
                KeyEvent::new(KeySymbol::Enter),
                KeyEvent::new(KeySymbol::Backspace),
                KeyEvent::new(KeySymbol::Delete),
            ]
        );
    }

    #[test]
    fn it_should_treat_trailing_escape_as_the_escape_key() {
        assert_eq!(decode_keys(b"\x1b"), vec![KeyEvent::new(KeySymbol::Escape)]);
    }

    #[test]
    fn it_should_decode_alt_and_control_modifiers() {
        let keys = decode_keys(b"\x1bq\x03\x01");
        assert_eq!(
            keys,
            vec![
                KeyEvent::with_modifiers(KeySymbol::Char('q'), Modifiers::ALT),
                KeyEvent::with_modifiers(KeySymbol::Char('c'), Modifiers::CONTROL),
                KeyEvent::with_modifiers(KeySymbol::Char('a'), Modifiers::CONTROL),
            ]
        );
        assert!(keys[1].is_interrupt());
        assert_eq!(keys[0].text(), None);
    }

    #[test]
    fn it_should_decode_utf8_text() {
        assert_eq!(decode_keys("π".as_bytes()), vec![KeyEvent::char('π')]);
        assert_eq!(KeyEvent::char('π').text(), Some('π'));
    }

    #[test]
    fn it_should_report_unknown_sequences() {
        assert_eq!(decode_keys(b"\x1b[Z"), vec![KeyEvent::new(KeySymbol::Unknown)]);
    }
}
