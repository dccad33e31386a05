//! Integration tests for the full scan path
//!
//! image → FaceScanner ×6 → concatenation → GlobalStateRepair → state string

use cubescan::core::{CubeAssembler, FaceImages, FaceScanner, ImageSource};
use cubescan::types::{ColorSymbol, RepairReason, ScanConfig, ScanError};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::path::PathBuf;

const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// 3×3 face image from a 9-letter row-major description
fn face_image(colors: &str, cell: u32) -> RgbImage {
    let symbols: Vec<ColorSymbol> = colors.chars().filter_map(ColorSymbol::from_letter).collect();
    assert_eq!(symbols.len(), 9);
    RgbImage::from_fn(cell * 3, cell * 3, |x, y| {
        let i = (y / cell * 3 + x / cell) as usize;
        Rgb(symbols[i].reference_rgb())
    })
}

fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn solid_faces() -> FaceImages {
    ColorSymbol::ALL
        .iter()
        .map(|&f| {
            let img = RgbImage::from_pixel(120, 90, Rgb(f.reference_rgb()));
            (f, ImageSource::Bytes(png_bytes(&img)))
        })
        .collect()
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cubescan_{}_{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// SCENARIO A: solved cube
// =============================================================================

#[test]
fn test_scenario_a_solid_faces() {
    let report = CubeAssembler::default().assemble(&solid_faces()).unwrap();

    assert_eq!(report.cube_state.to_string(), SOLVED);
    assert_eq!(report.global.reason, RepairReason::R201_STATE_BALANCED);
    for face in &report.faces {
        assert_eq!(face.reason, RepairReason::R101_FACE_UNIFORM);
    }
}

#[test]
fn test_scenario_a_from_directory() {
    let dir = temp_dir("dir");
    for face in ColorSymbol::ALL {
        let img = RgbImage::from_pixel(60, 60, Rgb(face.reference_rgb()));
        img.save(dir.join(format!("{}.png", face))).unwrap();
    }

    let images = FaceImages::from_dir(&dir);
    assert_eq!(images.len(), 6);
    let report = CubeAssembler::default().assemble(&images).unwrap();
    assert_eq!(report.cube_state.to_string(), SOLVED);

    let _ = std::fs::remove_dir_all(&dir);
}

// =============================================================================
// SCRAMBLED FACES
// =============================================================================

#[test]
fn test_scrambled_faces_read_back() {
    // a valid scramble pattern: nine of each color, centers fixed
    let faces = [
        "UURBUDLFF", "RRFDRLUBD", "FLDFFBURB", "DDULDRBFL", "LBLULURDB", "BFRRBUDLF",
    ];
    let expected: String = faces.concat();

    let images: FaceImages = ColorSymbol::ALL
        .iter()
        .zip(faces.iter())
        .map(|(&f, colors)| (f, ImageSource::Decoded(DynamicImage::ImageRgb8(face_image(colors, 40)))))
        .collect();

    let report = CubeAssembler::default().assemble(&images).unwrap();
    assert!(report.global.counts_before.is_balanced());
    assert_eq!(report.cube_state.to_string(), expected);
}

#[test]
fn test_glare_on_one_face_is_rebalanced() {
    // R face photographed under strong light: eight stickers look red
    let mut images = solid_faces();
    let glare = face_image("RRRRRRRRU", 50);
    images.insert(ColorSymbol::R, ImageSource::Bytes(png_bytes(&glare)));
    // and the real U face lost a sticker to red
    let u_face = face_image("UUUUUUUUR", 50);
    images.insert(ColorSymbol::U, ImageSource::Bytes(png_bytes(&u_face)));

    let report = CubeAssembler::default().assemble(&images).unwrap();
    let r_face = &report.faces[ColorSymbol::R.index()];
    assert_eq!(r_face.reason, RepairReason::R103_FACE_SKEW_REDISTRIBUTED);
    assert!(r_face.counts_after.get(ColorSymbol::R) < 7);

    assert_eq!(report.cube_state.as_slice().len(), 54);
    assert!(report.global.counts_after.is_balanced());
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_missing_face_reported_by_name() {
    let mut images = FaceImages::new();
    for face in [ColorSymbol::U, ColorSymbol::R, ColorSymbol::D, ColorSymbol::L, ColorSymbol::B] {
        images.insert(face, ImageSource::Path(PathBuf::from("/nonexistent/never-read.png")));
    }
    let err = CubeAssembler::default().assemble(&images).unwrap_err();
    assert_eq!(err, ScanError::MissingInput(ColorSymbol::F));
    assert_eq!(err.to_string(), "Missing image for face F");
}

#[test]
fn test_unreadable_path_names_face() {
    let mut images = solid_faces();
    images.insert(ColorSymbol::L, ImageSource::Path(PathBuf::from("/nonexistent/L.png")));
    let err = CubeAssembler::default().assemble(&images).unwrap_err();
    assert!(matches!(err, ScanError::Image { face: ColorSymbol::L, .. }));
}

// =============================================================================
// DEBUG OVERLAY
// =============================================================================

#[test]
fn test_debug_grid_writes_one_png_per_face() {
    let dir = temp_dir("grid");
    let config = ScanConfig::default().with_debug_dir(&dir);
    let assembler = CubeAssembler::with_scanner(FaceScanner::new(config));
    assembler.assemble(&solid_faces()).unwrap();

    let pngs = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map_or(false, |x| x == "png"))
        .count();
    assert_eq!(pngs, 6);

    let _ = std::fs::remove_dir_all(&dir);
}
