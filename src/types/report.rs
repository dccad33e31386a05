//! Diagnostic reports returned alongside repaired sequences

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::types::{ColorCounts, ColorSymbol, CubeState, FaceSequence, RepairReason};
use crate::STICKERS_PER_FACE;

/// Outcome of repairing one face
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceReport {
    /// Which face
    pub face: ColorSymbol,
    /// Classifier output before repair
    pub raw: FaceSequence,
    /// Sequence after repair
    pub repaired: FaceSequence,
    pub counts_before: ColorCounts,
    pub counts_after: ColorCounts,
    pub reason: RepairReason,
}

/// Outcome of the cross-face repair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalRepairReport {
    /// Repaired state
    pub cube_state: CubeState,
    pub counts_before: ColorCounts,
    pub counts_after: ColorCounts,
    /// Indices (0..54) whose color was retargeted
    pub changed_positions: Vec<usize>,
    pub reason: RepairReason,
}

impl GlobalRepairReport {
    /// Colors still off nine after the pass
    pub fn residual(&self) -> Vec<(ColorSymbol, usize)> {
        self.counts_after
            .iter()
            .filter(|&(_, n)| n != crate::STICKERS_PER_COLOR)
            .collect()
    }
}

/// Full result of scanning six faces
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Final 54-char state handed to a solver
    pub cube_state: CubeState,
    /// Per-face repair outcomes, in face order
    pub faces: Vec<FaceReport>,
    /// Cross-face repair outcome
    pub global: GlobalRepairReport,
    /// When the scan finished
    pub timestamp: DateTime<Utc>,
}

impl ScanReport {
    pub fn new(faces: Vec<FaceReport>, global: GlobalRepairReport) -> Self {
        Self {
            cube_state: global.cube_state.clone(),
            faces,
            global,
            timestamp: Utc::now(),
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "cube_state={} | reason={}",
            self.cube_state,
            self.global.reason.code()
        )
    }

    /// Format for terminal display: one colored block per face
    pub fn to_terminal_string(&self) -> String {
        let symbols = self.cube_state.as_slice();
        let faces: Vec<String> = symbols
            .chunks(STICKERS_PER_FACE)
            .zip(ColorSymbol::ALL)
            .map(|(chunk, face)| {
                let stickers: String = chunk
                    .iter()
                    .map(|s| {
                        format!(" {} ", s)
                            .on_color(s.terminal_color())
                            .black()
                            .to_string()
                    })
                    .collect();
                format!("{}: {}", face, stickers)
            })
            .collect();
        format!("{}\n{}", faces.join("\n"), self.cube_state)
    }
}
