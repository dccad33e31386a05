//! Core types for cubescan

mod color;
mod config;
mod counts;
mod error;
mod hsv;
mod reason;
mod report;
mod sticker;

pub use color::ColorSymbol;
pub use config::ScanConfig;
pub use counts::ColorCounts;
pub use error::ScanError;
pub use hsv::{circular_hue_distance, Hsv, HsvCenter, HsvRange, CHANNEL_SPAN, HUE_CIRCLE};
pub use reason::RepairReason;
pub use report::{FaceReport, GlobalRepairReport, ScanReport};
pub use sticker::{CubeState, FaceSequence, Sticker};
