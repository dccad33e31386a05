//! Canonical HSV bound boxes for the six sticker colors
//!
//! Kept as an ordered list: the order (U, R, F, D, L, B) is the classifier's
//! tie-break policy, so this must never become an unordered map.

use crate::types::{ColorSymbol, Hsv, HsvRange};

/// One row of a color table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub symbol: ColorSymbol,
    pub range: HsvRange,
}

impl ColorRange {
    pub const fn new(symbol: ColorSymbol, lower: Hsv, upper: Hsv) -> Self {
        Self {
            symbol,
            range: HsvRange::new(lower, upper),
        }
    }
}

/// Ordered table of color ranges
pub type ColorTable = [ColorRange; 6];

/// Default ranges, in face order
pub static COLOR_RANGES: ColorTable = [
    // White: any hue, low saturation, bright
    ColorRange::new(ColorSymbol::U, Hsv::new(0, 0, 180), Hsv::new(180, 30, 255)),
    ColorRange::new(ColorSymbol::R, Hsv::new(0, 120, 70), Hsv::new(10, 255, 255)),
    ColorRange::new(ColorSymbol::F, Hsv::new(40, 120, 70), Hsv::new(80, 255, 255)),
    ColorRange::new(ColorSymbol::D, Hsv::new(15, 120, 70), Hsv::new(35, 255, 255)),
    // Overlaps red and yellow; the score decides
    ColorRange::new(ColorSymbol::L, Hsv::new(5, 120, 70), Hsv::new(20, 255, 255)),
    ColorRange::new(ColorSymbol::B, Hsv::new(90, 120, 70), Hsv::new(130, 255, 255)),
];

/// Look up the default range for a symbol
pub fn range_for(symbol: ColorSymbol) -> HsvRange {
    COLOR_RANGES[symbol.index()].range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_follows_face_order() {
        let order: Vec<ColorSymbol> = COLOR_RANGES.iter().map(|r| r.symbol).collect();
        assert_eq!(order, ColorSymbol::ALL.to_vec());
    }

    #[test]
    fn test_range_for() {
        let blue = range_for(ColorSymbol::B);
        assert_eq!(blue.lower, Hsv::new(90, 120, 70));
        assert_eq!(blue.upper, Hsv::new(130, 255, 255));
    }
}
