//! Core modules for cubescan

pub mod ranges;
pub mod classifier;
pub mod scanner;
pub mod face_repair;
pub mod global_repair;
pub mod assembler;
pub mod api;

pub use ranges::{ColorRange, ColorTable, COLOR_RANGES};
pub use classifier::{fallback_color, match_score, Classification, StickerClassifier};
pub use scanner::{average_hsv, render_overlay, sample_regions, FaceScanner, Region};
pub use face_repair::FaceDistributionRepair;
pub use global_repair::GlobalStateRepair;
pub use assembler::{CubeAssembler, FaceImages, ImageSource};
pub use api::{create_router, run_server};
