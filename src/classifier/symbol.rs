//! Sign symbols
//!
//! The static (motion-free) fingerspelling letters plus the open-palm
//! greeting, which doubles as the word separator.

use serde::{Deserialize, Serialize};

/// All recognizable symbols, in display order
pub const SYMBOLS: [Symbol; 23] = [
    Symbol::A, Symbol::B, Symbol::C, Symbol::D, Symbol::E, Symbol::F,
    Symbol::G, Symbol::H, Symbol::I, Symbol::K, Symbol::L, Symbol::M, Symbol::N, Symbol::O,
    Symbol::R, Symbol::S, Symbol::T, Symbol::U, Symbol::V, Symbol::W,
    Symbol::X, Symbol::Y,
    Symbol::OpenPalm,
];

/// Symbol enum for type-safe handling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    A, B, C, D, E, F,
    G, H, I, K, L, M, N, O,
    R, S, T, U, V, W,
    X, Y,
    /// Spread open hand ("Hello"), the default word separator
    OpenPalm,
}

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::A => "A",
            Symbol::B => "B",
            Symbol::C => "C",
            Symbol::D => "D",
            Symbol::E => "E",
            Symbol::F => "F",
            Symbol::G => "G",
            Symbol::H => "H",
            Symbol::I => "I",
            Symbol::K => "K",
            Symbol::L => "L",
            Symbol::M => "M",
            Symbol::N => "N",
            Symbol::O => "O",
            Symbol::R => "R",
            Symbol::S => "S",
            Symbol::T => "T",
            Symbol::U => "U",
            Symbol::V => "V",
            Symbol::W => "W",
            Symbol::X => "X",
            Symbol::Y => "Y",
            Symbol::OpenPalm => "Hello",
        }
    }

    /// Character appended to the word being spelled, if any
    pub fn letter(&self) -> Option<char> {
        match self {
            Symbol::OpenPalm => None,
            other => other.as_str().chars().next(),
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
