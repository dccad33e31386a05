//! Face / sticker color symbols

use serde::{Deserialize, Serialize};

use crate::types::ScanError;

/// The six color symbols, each naming a face by its solved center color.
///
/// Declaration order is U, R, F, D, L, B. Every scan and tie-break in the
/// crate walks [`ColorSymbol::ALL`] in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorSymbol {
    /// Up - white
    U,
    /// Right - red
    R,
    /// Front - green
    F,
    /// Down - yellow
    D,
    /// Left - orange
    L,
    /// Back - blue
    B,
}

impl ColorSymbol {
    /// All symbols in face order
    pub const ALL: [ColorSymbol; 6] = [
        ColorSymbol::U,
        ColorSymbol::R,
        ColorSymbol::F,
        ColorSymbol::D,
        ColorSymbol::L,
        ColorSymbol::B,
    ];

    /// Position in [`ColorSymbol::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter encoding used in state strings
    pub fn letter(self) -> char {
        match self {
            ColorSymbol::U => 'U',
            ColorSymbol::R => 'R',
            ColorSymbol::F => 'F',
            ColorSymbol::D => 'D',
            ColorSymbol::L => 'L',
            ColorSymbol::B => 'B',
        }
    }

    /// Parse a single state-string letter
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(ColorSymbol::U),
            'R' => Some(ColorSymbol::R),
            'F' => Some(ColorSymbol::F),
            'D' => Some(ColorSymbol::D),
            'L' => Some(ColorSymbol::L),
            'B' => Some(ColorSymbol::B),
            _ => None,
        }
    }

    /// Sticker color name
    pub fn color_name(self) -> &'static str {
        match self {
            ColorSymbol::U => "white",
            ColorSymbol::R => "red",
            ColorSymbol::F => "green",
            ColorSymbol::D => "yellow",
            ColorSymbol::L => "orange",
            ColorSymbol::B => "blue",
        }
    }

    /// Reference sticker color (RGB), used for debug overlays and terminal output
    pub fn reference_rgb(self) -> [u8; 3] {
        match self {
            ColorSymbol::U => [255, 255, 255],
            ColorSymbol::R => [255, 0, 0],
            ColorSymbol::F => [0, 255, 0],
            ColorSymbol::D => [255, 255, 0],
            ColorSymbol::L => [255, 100, 0],
            ColorSymbol::B => [0, 0, 255],
        }
    }

    /// Terminal background color for this sticker
    pub fn terminal_color(self) -> colored::Color {
        let [r, g, b] = self.reference_rgb();
        colored::Color::TrueColor { r, g, b }
    }
}

impl std::fmt::Display for ColorSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl std::str::FromStr for ColorSymbol {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c).ok_or(ScanError::InvalidSymbol(c)),
            (Some(c), Some(_)) => Err(ScanError::InvalidSymbol(c)),
            (None, _) => Err(ScanError::EmptySymbol),
        }
    }
}
