//! Face scanner: one face image → nine classified stickers
//!
//! Resize to a square canvas, convert to HSV, split into a 3×3 grid and
//! average the central half of each cell (sticker borders and glare sit
//! near the cell edges).

use image::{imageops::FilterType, DynamicImage, Rgb, RgbImage};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::classifier::StickerClassifier;
use crate::core::face_repair::FaceDistributionRepair;
use crate::types::{ColorSymbol, FaceReport, FaceSequence, Hsv, ScanConfig, ScanError};
use crate::{GRID_SIZE, STICKERS_PER_FACE};

/// Grid line color for debug overlays
const OVERLAY_GRID_RGB: [u8; 3] = [0, 0, 255];
/// Line thickness for debug overlays
const OVERLAY_LINE_PX: u32 = 2;

/// Half-open pixel rectangle on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    pub fn area(&self) -> u32 {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }
}

/// Central-half sampling regions of the 3×3 grid, row-major
pub fn sample_regions(canvas: u32) -> [Region; STICKERS_PER_FACE] {
    let cell = canvas / GRID_SIZE;
    let inset = cell / 4;
    let n = GRID_SIZE as usize;

    std::array::from_fn(|i| {
        let (row, col) = ((i / n) as u32, (i % n) as u32);
        Region {
            x0: col * cell + inset,
            y0: row * cell + inset,
            x1: (col + 1) * cell - inset,
            y1: (row + 1) * cell - inset,
        }
    })
}

/// Average HSV over a region of an RGB canvas
pub fn average_hsv(canvas: &RgbImage, region: Region) -> Option<Hsv> {
    let pixels = (region.y0..region.y1).flat_map(|y| {
        (region.x0..region.x1).map(move |x| Hsv::from_rgb(canvas.get_pixel(x, y).0))
    });
    Hsv::mean(pixels)
}

/// Scans single faces; holds no per-request state
#[derive(Debug, Clone, Default)]
pub struct FaceScanner {
    config: ScanConfig,
    classifier: StickerClassifier,
    repair: FaceDistributionRepair,
}

impl FaceScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            classifier: StickerClassifier::new(),
            repair: FaceDistributionRepair::new(),
        }
    }

    /// Scanner with a custom classifier (e.g. a non-default color table)
    pub fn with_classifier(config: ScanConfig, classifier: StickerClassifier) -> Self {
        Self {
            config,
            classifier,
            repair: FaceDistributionRepair::new(),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Resize a face image onto the square sampling canvas
    pub fn canvas(&self, face: ColorSymbol, image: &DynamicImage) -> Result<RgbImage, ScanError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ScanError::image(face, "image has no pixels"));
        }
        let size = self.config.effective_canvas_size();
        Ok(image::imageops::resize(&image.to_rgb8(), size, size, FilterType::Triangle))
    }

    /// Averaged HSV sample of each grid cell, row-major
    pub fn sample(&self, face: ColorSymbol, image: &DynamicImage) -> Result<[Hsv; STICKERS_PER_FACE], ScanError> {
        let canvas = self.canvas(face, image)?;
        sample_canvas(face, &canvas)
    }

    /// Classifier output for each cell, before any repair
    pub fn classify(&self, face: ColorSymbol, image: &DynamicImage) -> Result<FaceSequence, ScanError> {
        let canvas = self.canvas(face, image)?;
        self.classify_canvas(face, &canvas)
    }

    /// Sample, classify and repair one face
    pub fn scan(&self, face: ColorSymbol, image: &DynamicImage) -> Result<FaceReport, ScanError> {
        let canvas = self.canvas(face, image)?;
        let raw = self.classify_canvas(face, &canvas)?;

        if let Some(dir) = &self.config.debug_dir {
            match render_overlay(dir, face, &canvas, &raw) {
                Ok(path) => debug!(face = %face, path = %path.display(), "grid overlay written"),
                Err(e) => warn!(face = %face, error = %e, "could not write grid overlay"),
            }
        }

        Ok(self.repair.repair(face, &raw))
    }

    fn classify_canvas(&self, face: ColorSymbol, canvas: &RgbImage) -> Result<FaceSequence, ScanError> {
        let samples = sample_canvas(face, canvas)?;
        let mut symbols = [ColorSymbol::U; STICKERS_PER_FACE];

        for (i, sample) in samples.iter().enumerate() {
            let result = self.classifier.classify_detailed(*sample);
            debug!(
                face = %face,
                row = i / GRID_SIZE as usize,
                col = i % GRID_SIZE as usize,
                sample = %sample,
                color = %result.symbol,
                fallback = result.used_fallback(),
                "sticker classified"
            );
            symbols[i] = result.symbol;
        }
        Ok(FaceSequence::new(symbols))
    }
}

fn sample_canvas(face: ColorSymbol, canvas: &RgbImage) -> Result<[Hsv; STICKERS_PER_FACE], ScanError> {
    let regions = sample_regions(canvas.width().min(canvas.height()));
    let mut samples = [Hsv::new(0, 0, 0); STICKERS_PER_FACE];
    for (slot, region) in samples.iter_mut().zip(regions) {
        *slot = average_hsv(canvas, region)
            .ok_or_else(|| ScanError::image(face, "sampling region is empty"))?;
    }
    Ok(samples)
}

// =============================================================================
// DEBUG OVERLAY
// =============================================================================

/// Draw the grid and each sampled region (outlined in its classified color)
/// and write `<dir>/<face>_<digest>.png`.
///
/// The digest is taken over the canvas pixels so concurrent scans never
/// share a file name.
pub fn render_overlay(
    dir: &Path,
    face: ColorSymbol,
    canvas: &RgbImage,
    colors: &FaceSequence,
) -> Result<PathBuf, image::ImageError> {
    let mut img = canvas.clone();
    let size = img.width().min(img.height());
    let cell = size / GRID_SIZE;

    for k in 0..=GRID_SIZE {
        let at = (k * cell).min(size.saturating_sub(OVERLAY_LINE_PX));
        fill_rect(&mut img, Region { x0: at, y0: 0, x1: at + OVERLAY_LINE_PX, y1: size }, OVERLAY_GRID_RGB);
        fill_rect(&mut img, Region { x0: 0, y0: at, x1: size, y1: at + OVERLAY_LINE_PX }, OVERLAY_GRID_RGB);
    }

    let regions = sample_regions(size);
    for sticker in colors.stickers(face) {
        let region = regions[usize::from(sticker.row) * GRID_SIZE as usize + usize::from(sticker.col)];
        outline_rect(&mut img, region, sticker.color.reference_rgb());
    }

    std::fs::create_dir_all(dir)?;
    let digest = Sha256::digest(img.as_raw());
    let tag: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();
    let path = dir.join(format!("{}_{}.png", face, tag));
    img.save(&path)?;
    Ok(path)
}

fn fill_rect(img: &mut RgbImage, r: Region, rgb: [u8; 3]) {
    let (w, h) = img.dimensions();
    for y in r.y0..r.y1.min(h) {
        for x in r.x0..r.x1.min(w) {
            img.put_pixel(x, y, Rgb(rgb));
        }
    }
}

fn outline_rect(img: &mut RgbImage, r: Region, rgb: [u8; 3]) {
    let t = OVERLAY_LINE_PX;
    fill_rect(img, Region { y1: r.y0 + t, ..r }, rgb);
    fill_rect(img, Region { y0: r.y1.saturating_sub(t), ..r }, rgb);
    fill_rect(img, Region { x1: r.x0 + t, ..r }, rgb);
    fill_rect(img, Region { x0: r.x1.saturating_sub(t), ..r }, rgb);
}

// =============================================================================
// TESTS
// =============================================================================
