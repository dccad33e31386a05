//! Sticker classifier: averaged HSV sample → color symbol
//!
//! Range match first (best score wins, earlier symbol wins ties), then a
//! fixed decision tree when no range contains the sample.

use serde::Serialize;

use crate::core::ranges::{ColorTable, COLOR_RANGES};
use crate::types::{circular_hue_distance, ColorSymbol, Hsv, HsvRange, CHANNEL_SPAN, HUE_CIRCLE};

// =============================================================================
// FALLBACK THRESHOLDS [C] - empirically tuned, boundaries are exclusive
// =============================================================================

/// Below this saturation everything is white
const FALLBACK_WHITE_SAT_MAX: u8 = 50;
/// Above this value the bright branch applies
const FALLBACK_BRIGHT_VALUE_MIN: u8 = 200;
/// Medium saturation band (exclusive on both ends)
const FALLBACK_MEDIUM_SAT: (u8, u8) = (40, 120);
/// High saturation branch
const FALLBACK_HIGH_SAT_MIN: u8 = 120;

/// How a sample was classified
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub symbol: ColorSymbol,
    /// Best range score, `None` when the fallback tree decided
    pub score: Option<f64>,
}

impl Classification {
    pub fn used_fallback(&self) -> bool {
        self.score.is_none()
    }
}

/// Classifies one sample against an ordered color table
#[derive(Debug, Clone)]
pub struct StickerClassifier {
    table: ColorTable,
}

impl Default for StickerClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StickerClassifier {
    /// Classifier over the canonical ranges
    pub fn new() -> Self {
        Self {
            table: COLOR_RANGES,
        }
    }

    /// Classifier over a custom table; table order is the tie-break order
    pub fn with_table(table: ColorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Best-matching symbol; never fails
    pub fn classify(&self, sample: Hsv) -> ColorSymbol {
        self.classify_detailed(sample).symbol
    }

    /// Best-matching symbol with the score that picked it
    pub fn classify_detailed(&self, sample: Hsv) -> Classification {
        let mut best: Option<(ColorSymbol, f64)> = None;

        for entry in &self.table {
            if !entry.range.contains(sample) {
                continue;
            }
            let score = match_score(&entry.range, sample);
            // strictly greater: ties keep the earlier symbol
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((entry.symbol, score));
            }
        }

        match best {
            Some((symbol, score)) => Classification {
                symbol,
                score: Some(score),
            },
            None => Classification {
                symbol: fallback_color(sample),
                score: None,
            },
        }
    }
}

/// `1 / (1 + hue_term + sat_term + val_term)`, distances taken from the
/// range center and normalized by channel span
pub fn match_score(range: &HsvRange, sample: Hsv) -> f64 {
    let center = range.center();
    let hue_term = circular_hue_distance(f64::from(sample.h), center.h) / HUE_CIRCLE;
    let sat_term = (f64::from(sample.s) - center.s).abs() / CHANNEL_SPAN;
    let val_term = (f64::from(sample.v) - center.v).abs() / CHANNEL_SPAN;
    1.0 / (1.0 + hue_term + sat_term + val_term)
}

/// Decision tree for samples outside every range.
///
/// Hues exactly on an arc boundary match no branch and drop through to the
/// white default.
pub fn fallback_color(sample: Hsv) -> ColorSymbol {
    let Hsv { h, s, v } = sample;

    if s < FALLBACK_WHITE_SAT_MAX {
        return ColorSymbol::U;
    }

    if v > FALLBACK_BRIGHT_VALUE_MIN {
        return if h < 15 || h > 165 {
            ColorSymbol::R
        } else if h > 15 && h < 35 {
            ColorSymbol::D
        } else {
            ColorSymbol::U
        };
    }

    let (medium_lo, medium_hi) = FALLBACK_MEDIUM_SAT;
    if s > medium_lo && s < medium_hi {
        if h < 15 || h > 165 {
            return ColorSymbol::R;
        } else if h > 15 && h < 35 {
            return ColorSymbol::D;
        } else if h > 35 && h < 70 {
            return ColorSymbol::F;
        } else if h > 70 && h < 130 {
            return ColorSymbol::B;
        } else if h > 130 && h < 165 {
            return ColorSymbol::L;
        }
    }

    if s > FALLBACK_HIGH_SAT_MIN {
        if h < 10 || h > 170 {
            return ColorSymbol::R;
        } else if h > 10 && h < 30 {
            return ColorSymbol::L;
        } else if h > 30 && h < 80 {
            return ColorSymbol::F;
        } else if h > 80 && h < 130 {
            return ColorSymbol::B;
        } else if h > 130 && h < 170 {
            return ColorSymbol::R;
        }
    }

    ColorSymbol::U
}
