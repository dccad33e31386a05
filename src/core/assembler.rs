//! Cube assembler: six face images → repaired 54-sticker state

use image::DynamicImage;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::global_repair::GlobalStateRepair;
use crate::core::scanner::FaceScanner;
use crate::types::{ColorSymbol, ScanConfig, ScanError, ScanReport};

/// File extensions tried by [`FaceImages::from_dir`], in order
pub const FACE_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Where a face image comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// File on disk
    Path(PathBuf),
    /// Encoded bytes (e.g. an upload)
    Bytes(Vec<u8>),
    /// Already decoded
    Decoded(DynamicImage),
}

impl ImageSource {
    /// Decode the source; errors name the face
    pub fn load(&self, face: ColorSymbol) -> Result<Cow<'_, DynamicImage>, ScanError> {
        match self {
            ImageSource::Path(path) => image::open(path)
                .map(Cow::Owned)
                .map_err(|e| ScanError::image(face, format!("{}: {}", path.display(), e))),
            ImageSource::Bytes(bytes) => image::load_from_memory(bytes)
                .map(Cow::Owned)
                .map_err(|e| ScanError::image(face, e)),
            ImageSource::Decoded(img) => Ok(Cow::Borrowed(img)),
        }
    }
}

/// Face label → image source
#[derive(Debug, Clone, Default)]
pub struct FaceImages {
    sources: HashMap<ColorSymbol, ImageSource>,
}

impl FaceImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, face: ColorSymbol, source: ImageSource) {
        self.sources.insert(face, source);
    }

    /// Builder-style insert
    pub fn with(mut self, face: ColorSymbol, source: ImageSource) -> Self {
        self.insert(face, source);
        self
    }

    pub fn get(&self, face: ColorSymbol) -> Option<&ImageSource> {
        self.sources.get(&face)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// First face (in U, R, F, D, L, B order) with no source
    pub fn first_missing(&self) -> Option<ColorSymbol> {
        ColorSymbol::ALL
            .iter()
            .copied()
            .find(|face| !self.sources.contains_key(face))
    }

    /// Collect `<dir>/<FACE>.png|jpg|jpeg`; faces with no file are left out
    pub fn from_dir(dir: &Path) -> Self {
        let mut images = Self::new();
        for face in ColorSymbol::ALL {
            let found = FACE_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}.{}", face, ext)))
                .find(|p| p.is_file());
            if let Some(path) = found {
                images.insert(face, ImageSource::Path(path));
            }
        }
        images
    }
}

impl FromIterator<(ColorSymbol, ImageSource)> for FaceImages {
    fn from_iter<I: IntoIterator<Item = (ColorSymbol, ImageSource)>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}

/// Runs the whole pipeline for one request
#[derive(Debug, Clone, Default)]
pub struct CubeAssembler {
    scanner: FaceScanner,
    global: GlobalStateRepair,
}

impl CubeAssembler {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            scanner: FaceScanner::new(config),
            global: GlobalStateRepair::new(),
        }
    }

    pub fn with_scanner(scanner: FaceScanner) -> Self {
        Self {
            scanner,
            global: GlobalStateRepair::new(),
        }
    }

    pub fn scanner(&self) -> &FaceScanner {
        &self.scanner
    }

    /// Scan all six faces and repair the assembled state.
    ///
    /// Every face must be present before anything is decoded; the first
    /// image that fails to decode aborts the whole scan.
    pub fn assemble(&self, images: &FaceImages) -> Result<ScanReport, ScanError> {
        if let Some(face) = images.first_missing() {
            return Err(ScanError::MissingInput(face));
        }

        let mut faces = Vec::with_capacity(ColorSymbol::ALL.len());
        for face in ColorSymbol::ALL {
            let source = images.get(face).ok_or(ScanError::MissingInput(face))?;
            let image = source.load(face)?;
            faces.push(self.scanner.scan(face, &image)?);
        }

        let symbols: Vec<ColorSymbol> = faces
            .iter()
            .flat_map(|f| f.repaired.iter().copied())
            .collect();
        let global = self.global.repair(&symbols)?;

        info!(cube_state = %global.cube_state, reason = global.reason.code(), "detected cube state");
        Ok(ScanReport::new(faces, global))
    }
}
