//! Integration tests for sticker classification
//!
//! Tests the range/score/fallback contract over the whole HSV cube

use cubescan::core::{ColorRange, StickerClassifier, COLOR_RANGES};
use cubescan::types::{ColorSymbol, Hsv};

/// Symbols whose canonical range contains the sample
fn containing(sample: Hsv) -> Vec<ColorSymbol> {
    COLOR_RANGES
        .iter()
        .filter(|r| r.range.contains(sample))
        .map(|r| r.symbol)
        .collect()
}

// =============================================================================
// PROPERTY: inside exactly one range → that range's color
// =============================================================================

#[test]
fn test_sample_in_single_range_classifies_to_it() {
    let classifier = StickerClassifier::new();
    let mut checked = 0;

    for h in (0..180u8).step_by(3) {
        for s in (0..=255u8).step_by(15) {
            for v in (0..=255u8).step_by(15) {
                let sample = Hsv::new(h, s, v);
                if let [only] = containing(sample).as_slice() {
                    assert_eq!(classifier.classify(sample), *only, "sample {}", sample);
                    checked += 1;
                }
            }
        }
    }
    assert!(checked > 1000, "only {} samples checked", checked);
}

#[test]
fn test_result_always_contains_sample_when_any_range_does() {
    let classifier = StickerClassifier::new();
    for h in (0..180u8).step_by(2) {
        for s in [0u8, 20, 120, 180, 255] {
            for v in [70u8, 180, 220, 255] {
                let sample = Hsv::new(h, s, v);
                let hits = containing(sample);
                let result = classifier.classify_detailed(sample);
                if hits.is_empty() {
                    assert!(result.used_fallback());
                } else {
                    assert!(hits.contains(&result.symbol), "sample {}", sample);
                }
            }
        }
    }
}

// =============================================================================
// PROPERTY: exact ties go to the earlier symbol
// =============================================================================

#[test]
fn test_tie_between_identical_ranges_uses_face_order() {
    let lower = Hsv::new(100, 60, 60);
    let upper = Hsv::new(140, 160, 160);

    // R (index 1) and L (index 4) share the same box
    let mut table = COLOR_RANGES;
    table[1] = ColorRange::new(ColorSymbol::R, lower, upper);
    table[4] = ColorRange::new(ColorSymbol::L, lower, upper);
    let classifier = StickerClassifier::with_table(table);

    for sample in [Hsv::new(120, 110, 110), Hsv::new(100, 60, 60), Hsv::new(139, 150, 70)] {
        // blue overlaps part of this box; only compare where B is out of range
        if COLOR_RANGES[5].range.contains(sample) {
            continue;
        }
        assert_eq!(classifier.classify(sample), ColorSymbol::R, "sample {}", sample);
    }
}

#[test]
fn test_every_symbol_wins_its_own_center() {
    let classifier = StickerClassifier::new();
    for entry in COLOR_RANGES.iter() {
        let c = entry.range.center();
        let sample = Hsv::new(c.h as u8, c.s as u8, c.v as u8);
        assert_eq!(classifier.classify(sample), entry.symbol);
    }
}

// =============================================================================
// FALLBACK
// =============================================================================

#[test]
fn test_dim_saturated_stickers_use_hue_arcs() {
    let classifier = StickerClassifier::new();
    // value 50 is below every range, so the fallback tree decides
    let cases = [
        (Hsv::new(2, 200, 50), ColorSymbol::R),
        (Hsv::new(20, 200, 50), ColorSymbol::L),
        (Hsv::new(60, 200, 50), ColorSymbol::F),
        (Hsv::new(110, 200, 50), ColorSymbol::B),
        (Hsv::new(178, 200, 50), ColorSymbol::R),
    ];
    for (sample, expected) in cases {
        let result = classifier.classify_detailed(sample);
        assert!(result.used_fallback());
        assert_eq!(result.symbol, expected, "sample {}", sample);
    }
}

#[test]
fn test_washed_out_sticker_is_white() {
    let classifier = StickerClassifier::new();
    // bright but too saturated for U's range, too pale for the colored ones
    assert_eq!(classifier.classify(Hsv::new(60, 45, 240)), ColorSymbol::U);
}
