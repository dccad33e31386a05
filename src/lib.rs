//! cubescan: Rubik's Cube state detection from six face photographs
//!
//! Pipeline: image → FaceScanner (3×3 sampling → StickerClassifier → face repair)
//! ×6 → concatenation → GlobalStateRepair → 54-char state string

pub mod core;
pub mod types;

// =============================================================================
// GEOMETRY [C]
// =============================================================================

/// Side of the square canvas every face image is resized to
pub const CANVAS_SIZE: u32 = 300;

/// Smallest canvas that still gives every sampling region a pixel
pub const MIN_CANVAS_SIZE: u32 = GRID_SIZE * 4;

/// Largest accepted canvas (an RGB canvas this size is ~12 MB)
pub const MAX_CANVAS_SIZE: u32 = 2000;

/// Stickers per face edge
pub const GRID_SIZE: u32 = 3;

/// Stickers on one face
pub const STICKERS_PER_FACE: usize = 9;

/// Faces on a cube
pub const FACE_COUNT: usize = 6;

/// Stickers on the whole cube (6 × 9)
pub const CUBE_STICKERS: usize = 54;

/// Target count for every color in a valid cube state
pub const STICKERS_PER_COLOR: usize = 9;

// =============================================================================
// FACE REPAIR LIMITS [C]
// =============================================================================

/// Above this, the dominant color on a face is treated as a misread
pub const FACE_SKEW_LIMIT: usize = 6;

/// Above this, the aggressive redistribution pass runs
pub const FACE_AGGRESSIVE_LIMIT: usize = 7;

/// Stickers of the dominant color left after the aggressive pass
pub const FACE_AGGRESSIVE_KEEP: usize = 3;

/// Replacement colors must currently appear fewer than this many times
pub const FACE_REPLACEMENT_CEILING: usize = 2;

/// No color may exceed this after the final face pass
pub const FACE_FINAL_LIMIT: usize = 5;

/// Stickers of an over-limit color left after the final face pass
pub const FACE_FINAL_KEEP: usize = 4;

// =============================================================================
// HTTP [C]
// =============================================================================

/// Request body ceiling for `/solve`: six faces at up to 16 MB each
pub const UPLOAD_LIMIT_BYTES: usize = 6 * 16 * 1024 * 1024;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
