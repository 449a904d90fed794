// src/color.rs

//! Defines the `NamedColor` palette, its SGR codes, and the color-pair cache
//! used by the console display.

use std::collections::HashMap;

use log::trace;
use serde::{Deserialize, Serialize};

const SGR_FG_BASE: u16 = 30;
const SGR_BG_BASE: u16 = 40;
const SGR_BRIGHT_FG_BASE: u16 = 90;
const SGR_BRIGHT_BG_BASE: u16 = 100;

/// Standard ANSI named colors (indices 0-15).
/// These are the 8 normal and 8 bright colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl NamedColor {
    /// SGR parameter selecting this color as foreground.
    pub fn fg_code(self) -> u16 {
        let idx = self as u8 as u16;
        if idx < 8 {
            SGR_FG_BASE + idx
        } else {
            SGR_BRIGHT_FG_BASE + (idx - 8)
        }
    }

    /// SGR parameter selecting this color as background.
    pub fn bg_code(self) -> u16 {
        let idx = self as u8 as u16;
        if idx < 8 {
            SGR_BG_BASE + idx
        } else {
            SGR_BRIGHT_BG_BASE + (idx - 8)
        }
    }
}

/// Memoizes `(foreground, background)` pairs.
///
/// Ids are allocated on first use, counting up from 1, and stay valid for the
/// lifetime of the cache. Each id owns the SGR sequence that selects it.
#[derive(Debug, Default)]
pub struct ColorPairCache {
    pairs: HashMap<(NamedColor, NamedColor), u16>,
    sequences: Vec<String>,
}

impl ColorPairCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of `(fg, bg)`, allocating one if the pair is new.
    pub fn pair_id(&mut self, fg: NamedColor, bg: NamedColor) -> u16 {
        if let Some(&id) = self.pairs.get(&(fg, bg)) {
            return id;
        }
        let id = self.sequences.len() as u16 + 1;
        self.sequences
            .push(format!("\x1b[0;{};{}m", fg.fg_code(), bg.bg_code()));
        self.pairs.insert((fg, bg), id);
        trace!("ColorPairCache: allocated pair {} for {:?} on {:?}", id, fg, bg);
        id
    }

    /// SGR sequence for an allocated id.
    pub fn sequence(&self, id: u16) -> Option<&str> {
        (id as usize)
            .checked_sub(1)
            .and_then(|i| self.sequences.get(i))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sgr_codes_cover_normal_and_bright_colors() {
        assert_eq!(NamedColor::Black.fg_code(), 30);
        assert_eq!(NamedColor::White.bg_code(), 47);
        assert_eq!(NamedColor::BrightRed.fg_code(), 91);
        assert_eq!(NamedColor::BrightWhite.bg_code(), 107);
    }

    #[test]
    fn pair_ids_are_consecutive_and_reused() {
        let mut cache = ColorPairCache::new();
        assert!(cache.is_empty());
        let a = cache.pair_id(NamedColor::White, NamedColor::Black);
        let b = cache.pair_id(NamedColor::Black, NamedColor::White);
        let a_again = cache.pair_id(NamedColor::White, NamedColor::Black);
        assert_eq!((a, b, a_again), (1, 2, 1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn sequences_select_both_colors() {
        let mut cache = ColorPairCache::new();
        let id = cache.pair_id(NamedColor::Red, NamedColor::White);
        assert_eq!(cache.sequence(id), Some("\x1b[0;31;47m"));
        assert_eq!(cache.sequence(0), None);
        assert_eq!(cache.sequence(id + 1), None);
    }
}
