//! Stickers, face sequences and the assembled cube state

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::{ColorCounts, ColorSymbol, ScanError};
use crate::{CUBE_STICKERS, GRID_SIZE, STICKERS_PER_FACE};

lazy_static! {
    // Separators people put between faces when typing a state by hand
    static ref STATE_SEPARATORS: Regex = Regex::new(r"[\s,;/|_-]+").unwrap();
}

/// One classified sticker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    pub face: ColorSymbol,
    pub row: u8,
    pub col: u8,
    pub color: ColorSymbol,
}

/// Nine stickers of one face, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSequence([ColorSymbol; STICKERS_PER_FACE]);

impl FaceSequence {
    pub fn new(symbols: [ColorSymbol; STICKERS_PER_FACE]) -> Self {
        Self(symbols)
    }

    /// A face showing one color everywhere
    pub fn uniform(color: ColorSymbol) -> Self {
        Self([color; STICKERS_PER_FACE])
    }

    pub fn from_slice(symbols: &[ColorSymbol]) -> Result<Self, ScanError> {
        let array: [ColorSymbol; STICKERS_PER_FACE] =
            symbols
                .try_into()
                .map_err(|_| ScanError::InvariantViolation {
                    expected: STICKERS_PER_FACE,
                    actual: symbols.len(),
                })?;
        Ok(Self(array))
    }

    pub fn as_slice(&self) -> &[ColorSymbol] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorSymbol> {
        self.0.iter()
    }

    /// Sticker at `(row, col)`; `None` off the 3×3 grid
    pub fn get(&self, row: usize, col: usize) -> Option<ColorSymbol> {
        let n = GRID_SIZE as usize;
        if row >= n || col >= n {
            return None;
        }
        Some(self.0[row * n + col])
    }

    pub fn set(&mut self, index: usize, color: ColorSymbol) {
        self.0[index] = color;
    }

    pub fn counts(&self) -> ColorCounts {
        ColorCounts::from_symbols(&self.0)
    }

    /// Expand into stickers carrying their face and grid position
    pub fn stickers(&self, face: ColorSymbol) -> Vec<Sticker> {
        let n = GRID_SIZE as usize;
        self.0
            .iter()
            .enumerate()
            .map(|(i, &color)| Sticker {
                face,
                row: (i / n) as u8,
                col: (i % n) as u8,
                color,
            })
            .collect()
    }
}

impl std::fmt::Display for FaceSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for FaceSequence {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_symbols(s)?)
    }
}

impl Serialize for FaceSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// All 54 stickers, faces in U, R, F, D, L, B order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeState(Vec<ColorSymbol>);

impl CubeState {
    /// Wrap a sticker sequence; fails unless it holds exactly 54 symbols
    pub fn from_symbols(symbols: Vec<ColorSymbol>) -> Result<Self, ScanError> {
        if symbols.len() != CUBE_STICKERS {
            return Err(ScanError::InvariantViolation {
                expected: CUBE_STICKERS,
                actual: symbols.len(),
            });
        }
        Ok(Self(symbols))
    }

    /// Concatenate faces in the order given
    pub fn from_faces(faces: &[FaceSequence]) -> Result<Self, ScanError> {
        let symbols = faces.iter().flat_map(|f| f.iter().copied()).collect();
        Self::from_symbols(symbols)
    }

    pub fn as_slice(&self) -> &[ColorSymbol] {
        &self.0
    }

    pub fn into_symbols(self) -> Vec<ColorSymbol> {
        self.0
    }

    /// The nine stickers of one face
    pub fn face(&self, face: ColorSymbol) -> FaceSequence {
        let start = face.index() * STICKERS_PER_FACE;
        let mut symbols = [ColorSymbol::U; STICKERS_PER_FACE];
        symbols.copy_from_slice(&self.0[start..start + STICKERS_PER_FACE]);
        FaceSequence(symbols)
    }

    pub fn counts(&self) -> ColorCounts {
        ColorCounts::from_symbols(&self.0)
    }
}

impl std::fmt::Display for CubeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for CubeState {
    type Err = ScanError;

    /// Accepts the bare 54 letters, or faces split by whitespace, commas,
    /// slashes, bars, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbols(parse_symbols(s)?)
    }
}

impl Serialize for CubeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strip separators and decode letters
fn parse_symbols(s: &str) -> Result<Vec<ColorSymbol>, ScanError> {
    let compact = STATE_SEPARATORS.replace_all(s.trim(), "");
    compact
        .chars()
        .map(|c| ColorSymbol::from_letter(c).ok_or(ScanError::InvalidSymbol(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColorSymbol::*;

    const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

    #[test]
    fn test_parse_solved_state() {
        let state: CubeState = SOLVED.parse().unwrap();
        assert_eq!(state.to_string(), SOLVED);
        assert!(state.counts().is_balanced());
        assert_eq!(state.face(D), FaceSequence::uniform(D));
    }

    #[test]
    fn test_parse_with_separators() {
        let spaced = "UUUUUUUUU RRRRRRRRR/FFFFFFFFF,DDDDDDDDD|LLLLLLLLL\nBBBBBBBBB";
        let state: CubeState = spaced.parse().unwrap();
        assert_eq!(state.to_string(), SOLVED);
    }

    #[test]
    fn test_wrong_length_is_invariant_violation() {
        let err = SOLVED[..53].parse::<CubeState>().unwrap_err();
        assert_eq!(err, ScanError::InvariantViolation { expected: 54, actual: 53 });
    }

    #[test]
    fn test_bad_letter() {
        let bad = SOLVED.replacen('F', "X", 1);
        assert_eq!(bad.parse::<CubeState>().unwrap_err(), ScanError::InvalidSymbol('X'));
    }

    #[test]
    fn test_face_stickers_positions() {
        let face: FaceSequence = "URFDLBURF".parse().unwrap();
        let stickers = face.stickers(L);
        assert_eq!(stickers.len(), 9);
        assert_eq!(stickers[4], Sticker { face: L, row: 1, col: 1, color: L });
        assert_eq!(face.get(2, 0), Some(U));
        assert_eq!(face.get(1, 2), Some(B));
        assert_eq!(face.get(0, 3), None);
        assert_eq!(face.get(3, 0), None);
    }
}
