//! Reason codes for repair outcomes

use serde::{Deserialize, Serialize};

/// Why a repair pass produced the sequence it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum RepairReason {
    // =========================================================================
    // R1xx: Single face
    // =========================================================================
    /// Face shows a single color, repair skipped
    R101_FACE_UNIFORM,
    /// Dominant color within limits, face unchanged
    R102_FACE_WITHIN_LIMITS,
    /// Dominant color over limit, stickers redistributed
    R103_FACE_SKEW_REDISTRIBUTED,

    // =========================================================================
    // R2xx: Whole cube
    // =========================================================================
    /// Exactly nine of every color, state unchanged
    R201_STATE_BALANCED,
    /// Colors redistributed, nine of every color
    R202_STATE_REDISTRIBUTED,
    /// Greedy pass finished with some color still off nine
    R203_STATE_RESIDUAL_IMBALANCE,
}

impl RepairReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_FACE_UNIFORM => "R101_FACE_UNIFORM",
            Self::R102_FACE_WITHIN_LIMITS => "R102_FACE_WITHIN_LIMITS",
            Self::R103_FACE_SKEW_REDISTRIBUTED => "R103_FACE_SKEW_REDISTRIBUTED",
            Self::R201_STATE_BALANCED => "R201_STATE_BALANCED",
            Self::R202_STATE_REDISTRIBUTED => "R202_STATE_REDISTRIBUTED",
            Self::R203_STATE_RESIDUAL_IMBALANCE => "R203_STATE_RESIDUAL_IMBALANCE",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_FACE_UNIFORM => "Single color on face",
            Self::R102_FACE_WITHIN_LIMITS => "Face distribution plausible",
            Self::R103_FACE_SKEW_REDISTRIBUTED => "Dominant color redistributed",
            Self::R201_STATE_BALANCED => "Nine of each color",
            Self::R202_STATE_REDISTRIBUTED => "Rebalanced to nine of each color",
            Self::R203_STATE_RESIDUAL_IMBALANCE => "Counts still off after rebalancing",
        }
    }

    /// Did the pass change anything?
    pub fn modified(&self) -> bool {
        matches!(
            self,
            Self::R103_FACE_SKEW_REDISTRIBUTED
                | Self::R202_STATE_REDISTRIBUTED
                | Self::R203_STATE_RESIDUAL_IMBALANCE
        )
    }
}

impl std::fmt::Display for RepairReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
