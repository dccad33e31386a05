//! Global state repair: greedy cross-face push toward nine of each color
//!
//! One pass over the colors in face order. A color above nine hands its
//! first surplus stickers (by position) to the first colors still below
//! nine; a color below nine takes the first stickers whose color is above
//! nine. Colors already at nine are never touched.

use tracing::{info, warn};

use crate::types::{ColorCounts, ColorSymbol, CubeState, GlobalRepairReport, RepairReason, ScanError};
use crate::{CUBE_STICKERS, STICKERS_PER_COLOR};

#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalStateRepair;

impl GlobalStateRepair {
    pub fn new() -> Self {
        Self
    }

    /// Repair a raw sticker sequence; fails unless it holds exactly 54 symbols
    pub fn repair(&self, symbols: &[ColorSymbol]) -> Result<GlobalRepairReport, ScanError> {
        if symbols.len() != CUBE_STICKERS {
            return Err(ScanError::InvariantViolation {
                expected: CUBE_STICKERS,
                actual: symbols.len(),
            });
        }

        let counts_before = ColorCounts::from_symbols(symbols);
        info!(counts = %counts_before, "cube state color counts");

        let mut state = symbols.to_vec();
        let mut counts = counts_before;
        let mut changed = Vec::new();

        if !counts.is_balanced() {
            info!("fixing cube state color distribution");
            for target in ColorSymbol::ALL {
                let current = counts.get(target);
                if current > STICKERS_PER_COLOR {
                    shed_surplus(&mut state, &mut counts, &mut changed, target, current);
                } else if current < STICKERS_PER_COLOR {
                    fill_deficit(&mut state, &mut counts, &mut changed, target, current);
                }
            }
        }

        let counts_after = ColorCounts::from_symbols(&state);
        let reason = if changed.is_empty() && counts_after.is_balanced() {
            RepairReason::R201_STATE_BALANCED
        } else if counts_after.is_balanced() {
            info!(counts = %counts_after, "fixed cube state color counts");
            RepairReason::R202_STATE_REDISTRIBUTED
        } else {
            for (color, n) in counts_after.iter().filter(|&(_, n)| n != STICKERS_PER_COLOR) {
                warn!(color = %color, count = n, "still off nine stickers after repair");
            }
            RepairReason::R203_STATE_RESIDUAL_IMBALANCE
        };

        changed.sort_unstable();
        changed.dedup();

        Ok(GlobalRepairReport {
            cube_state: CubeState::from_symbols(state)?,
            counts_before,
            counts_after,
            changed_positions: changed,
            reason,
        })
    }

    /// Repair a typed state
    pub fn repair_state(&self, state: &CubeState) -> Result<GlobalRepairReport, ScanError> {
        self.repair(state.as_slice())
    }
}

fn shed_surplus(
    state: &mut [ColorSymbol],
    counts: &mut ColorCounts,
    changed: &mut Vec<usize>,
    target: ColorSymbol,
    current: usize,
) {
    let mut excess = current - STICKERS_PER_COLOR;

    for (i, slot) in state.iter_mut().enumerate() {
        if excess == 0 {
            break;
        }
        if *slot != target {
            continue;
        }
        let receiver = ColorSymbol::ALL
            .iter()
            .copied()
            .find(|&c| counts.get(c) < STICKERS_PER_COLOR);
        if let Some(receiver) = receiver {
            *slot = receiver;
            counts.transfer(target, receiver);
            changed.push(i);
            excess -= 1;
        }
    }
}

fn fill_deficit(
    state: &mut [ColorSymbol],
    counts: &mut ColorCounts,
    changed: &mut Vec<usize>,
    target: ColorSymbol,
    current: usize,
) {
    let mut needed = STICKERS_PER_COLOR - current;

    for (i, slot) in state.iter_mut().enumerate() {
        if needed == 0 {
            break;
        }
        let donor = *slot;
        if counts.get(donor) > STICKERS_PER_COLOR {
            *slot = target;
            counts.transfer(donor, target);
            changed.push(i);
            needed -= 1;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
