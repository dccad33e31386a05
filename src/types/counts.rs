//! Per-color sticker counts in fixed U, R, F, D, L, B order

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::ColorSymbol;
use crate::STICKERS_PER_COLOR;

/// Count of each color symbol, indexed by [`ColorSymbol::index`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCounts([usize; 6]);

impl ColorCounts {
    /// Count a sequence of symbols
    pub fn from_symbols<'a, I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = &'a ColorSymbol>,
    {
        let mut counts = Self::default();
        for symbol in symbols {
            counts.increment(*symbol);
        }
        counts
    }

    pub fn get(&self, symbol: ColorSymbol) -> usize {
        self.0[symbol.index()]
    }

    pub fn increment(&mut self, symbol: ColorSymbol) {
        self.0[symbol.index()] += 1;
    }

    pub fn decrement(&mut self, symbol: ColorSymbol) {
        self.0[symbol.index()] = self.0[symbol.index()].saturating_sub(1);
    }

    /// Move one sticker's worth of count from `from` to `to`
    pub fn transfer(&mut self, from: ColorSymbol, to: ColorSymbol) {
        self.decrement(from);
        self.increment(to);
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Number of colors with a non-zero count
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|&&n| n > 0).count()
    }

    /// Every color appears exactly nine times
    pub fn is_balanced(&self) -> bool {
        self.0.iter().all(|&n| n == STICKERS_PER_COLOR)
    }

    /// (symbol, count) pairs in fixed order
    pub fn iter(&self) -> impl Iterator<Item = (ColorSymbol, usize)> + '_ {
        ColorSymbol::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Sum of |count - 9| over all colors; zero exactly when balanced
    pub fn imbalance(&self) -> usize {
        self.0
            .iter()
            .map(|&n| n.abs_diff(STICKERS_PER_COLOR))
            .sum()
    }
}

impl std::fmt::Display for ColorCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(c, n)| format!("{}={}", c, n)).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl Serialize for ColorCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for (symbol, count) in self.iter() {
            map.serialize_entry(&symbol, &count)?;
        }
        map.end()
    }
}
