//! Runtime scan configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{CANVAS_SIZE, MAX_CANVAS_SIZE, MIN_CANVAS_SIZE, UPLOAD_LIMIT_BYTES};

/// Knobs for [`crate::core::FaceScanner`] and the HTTP boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Side of the square canvas images are resized to
    pub canvas_size: u32,
    /// Where to write grid overlay PNGs; `None` disables rendering
    pub debug_dir: Option<PathBuf>,
    /// Largest request body `/solve` accepts
    pub upload_limit: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            debug_dir: None,
            upload_limit: UPLOAD_LIMIT_BYTES,
        }
    }
}

impl ScanConfig {
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }

    /// Canvas side, clamped to `MIN_CANVAS_SIZE..=MAX_CANVAS_SIZE`
    pub fn effective_canvas_size(&self) -> u32 {
        self.canvas_size.clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE)
    }
}
