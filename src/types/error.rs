//! Error taxonomy for scanning and repair

use thiserror::Error;

use crate::types::ColorSymbol;

/// Everything that can abort a scan.
///
/// Color skew is never an error: the repair passes always produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A required face image was not supplied
    #[error("Missing image for face {0}")]
    MissingInput(ColorSymbol),

    /// A face image could not be decoded or had no pixels
    #[error("Could not load image for face {face}: {reason}")]
    Image { face: ColorSymbol, reason: String },

    /// The assembled state is not the expected number of stickers
    #[error("Cube state must be {expected} characters, got {actual}")]
    InvariantViolation { expected: usize, actual: usize },

    /// A state string contained a character outside U, R, F, D, L, B
    #[error("Invalid color symbol {0:?}")]
    InvalidSymbol(char),

    /// A color symbol was expected but the input was blank
    #[error("Expected a color symbol (U, R, F, D, L, B), got empty input")]
    EmptySymbol,
}

impl ScanError {
    /// Wrap an image decoding failure for a face
    pub fn image(face: ColorSymbol, reason: impl std::fmt::Display) -> Self {
        ScanError::Image {
            face,
            reason: reason.to_string(),
        }
    }

    /// The face this error refers to, if any
    pub fn face(&self) -> Option<ColorSymbol> {
        match self {
            ScanError::MissingInput(face) | ScanError::Image { face, .. } => Some(*face),
            _ => None,
        }
    }
}
