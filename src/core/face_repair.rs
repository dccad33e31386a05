//! Face distribution repair: undo a single color swamping one face
//!
//! Seven or more identical stickers on one face almost always means the
//! lighting pushed several stickers into the same range. Two passes, both
//! confined to the face:
//! - aggressive (dominant > 7): keep 3, hand the rest to colors seen < 2 times
//! - final (any color > 5): keep 4, hand the rest to the rarest present color

use tracing::{info, warn};

use crate::types::{ColorSymbol, FaceReport, FaceSequence, RepairReason};
use crate::{
    FACE_AGGRESSIVE_KEEP, FACE_AGGRESSIVE_LIMIT, FACE_FINAL_KEEP, FACE_FINAL_LIMIT,
    FACE_REPLACEMENT_CEILING, FACE_SKEW_LIMIT, STICKERS_PER_FACE,
};

/// Counts in first-occurrence order.
///
/// Ties in `most_common` / `least_common` resolve to the entry seen first.
#[derive(Debug, Clone, Default)]
struct Tally {
    entries: Vec<(ColorSymbol, usize)>,
}

impl Tally {
    fn of(symbols: &[ColorSymbol]) -> Self {
        let mut tally = Self::default();
        for &symbol in symbols {
            tally.increment(symbol);
        }
        tally
    }

    fn get(&self, symbol: ColorSymbol) -> usize {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map_or(0, |(_, n)| *n)
    }

    fn increment(&mut self, symbol: ColorSymbol) {
        match self.entries.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, n)) => *n += 1,
            None => self.entries.push((symbol, 1)),
        }
    }

    fn decrement(&mut self, symbol: ColorSymbol) {
        if let Some((_, n)) = self.entries.iter_mut().find(|(s, _)| *s == symbol) {
            *n = n.saturating_sub(1);
        }
    }

    fn distinct(&self) -> usize {
        self.entries.len()
    }

    fn symbols(&self) -> Vec<ColorSymbol> {
        self.entries.iter().map(|(s, _)| *s).collect()
    }

    fn most_common(&self) -> Option<(ColorSymbol, usize)> {
        let mut best: Option<(ColorSymbol, usize)> = None;
        for &(symbol, n) in &self.entries {
            if best.map_or(true, |(_, b)| n > b) {
                best = Some((symbol, n));
            }
        }
        best
    }

    fn least_common(&self) -> Option<(ColorSymbol, usize)> {
        let mut best: Option<(ColorSymbol, usize)> = None;
        for &(symbol, n) in &self.entries {
            if best.map_or(true, |(_, b)| n < b) {
                best = Some((symbol, n));
            }
        }
        best
    }
}

/// Per-face skew repair
#[derive(Debug, Default, Clone, Copy)]
pub struct FaceDistributionRepair;

impl FaceDistributionRepair {
    pub fn new() -> Self {
        Self
    }

    /// Repair one face; `raw` is left untouched and the result is in the report
    pub fn repair(&self, face: ColorSymbol, raw: &FaceSequence) -> FaceReport {
        let counts_before = raw.counts();
        info!(face = %face, counts = %counts_before, "face color distribution");

        let mut repaired = *raw;
        let tally = Tally::of(raw.as_slice());

        let reason = match tally.most_common() {
            _ if tally.distinct() <= 1 => RepairReason::R101_FACE_UNIFORM,
            Some((dominant, count)) if count > FACE_SKEW_LIMIT => {
                warn!(
                    face = %face,
                    color = %dominant,
                    count,
                    "too many stickers of one color on face, redistributing"
                );
                if count > FACE_AGGRESSIVE_LIMIT {
                    aggressive_pass(&mut repaired, tally, dominant, count);
                }
                final_pass(&mut repaired);

                if repaired == *raw {
                    RepairReason::R102_FACE_WITHIN_LIMITS
                } else {
                    RepairReason::R103_FACE_SKEW_REDISTRIBUTED
                }
            }
            _ => RepairReason::R102_FACE_WITHIN_LIMITS,
        };

        let counts_after = repaired.counts();
        if reason.modified() {
            info!(face = %face, counts = %counts_after, "face distribution after repair");
        }

        FaceReport {
            face,
            raw: *raw,
            repaired,
            counts_before,
            counts_after,
            reason,
        }
    }
}

/// Keep `FACE_AGGRESSIVE_KEEP` of the dominant color; every other occurrence
/// goes to the first color (face order) currently counted below the ceiling
fn aggressive_pass(seq: &mut FaceSequence, mut tally: Tally, dominant: ColorSymbol, count: usize) {
    let mut budget = count - FACE_AGGRESSIVE_KEEP;

    for i in 0..STICKERS_PER_FACE {
        if budget == 0 {
            break;
        }
        if seq.as_slice()[i] != dominant {
            continue;
        }
        let replacement = ColorSymbol::ALL
            .iter()
            .copied()
            .find(|&c| c != dominant && tally.get(c) < FACE_REPLACEMENT_CEILING);
        if let Some(replacement) = replacement {
            seq.set(i, replacement);
            tally.increment(replacement);
            tally.decrement(dominant);
        }
        // spent even without a candidate
        budget -= 1;
    }
}

/// Cap every color at `FACE_FINAL_KEEP` once it exceeds `FACE_FINAL_LIMIT`,
/// feeding the rarest color already on the face
fn final_pass(seq: &mut FaceSequence) {
    let mut tally = Tally::of(seq.as_slice());

    for color in tally.symbols() {
        let count = tally.get(color);
        if count <= FACE_FINAL_LIMIT {
            continue;
        }
        let mut excess = count - FACE_FINAL_KEEP;

        for i in 0..STICKERS_PER_FACE {
            if excess == 0 {
                break;
            }
            if seq.as_slice()[i] != color {
                continue;
            }
            if let Some((least, _)) = tally.least_common() {
                if least != color {
                    seq.set(i, least);
                    tally.increment(least);
                    tally.decrement(color);
                    excess -= 1;
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
