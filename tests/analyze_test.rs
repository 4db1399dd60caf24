//! Single-image analysis through the public API.

mod common;

use common::{fixtures, fixtures::colors, TestWorkspace};
use pretty_assertions::assert_eq;
use stain_mask::{Hsv8, QuantifyError, Rgb8};
use stainquant::error::AnalysisError;
use stainquant::models::{MaskCategory, ReportRow, Settings};
use stainquant::services::{analyze_file, artifact_dir, load_image, save_artifacts};

#[test]
fn test_analyze_mixed_slide() {
    let ws = TestWorkspace::new();
    // 20 stain, 30 background, 50 tissue
    let path = ws.add_image("mixed.tif", &fixtures::slide(10, 10, 20, 30));

    let quantifier = Settings::default().quantifier().unwrap();
    let analysis = analyze_file(&path, &quantifier).unwrap();
    let result = analysis.result().unwrap();

    assert_eq!(result.signal, 20);
    assert_eq!(result.exclusion, 30);
    assert_eq!(result.total, 100);
    assert!((result.ratio - 20.0 / 70.0).abs() < 1e-12);
}

#[test]
fn test_analyze_all_background_is_undefined() {
    let ws = TestWorkspace::new();
    let path = ws.add_image("blank.tif", &fixtures::solid(8, 8, colors::BACKGROUND));

    let quantifier = Settings::default().quantifier().unwrap();
    let analysis = analyze_file(&path, &quantifier).unwrap();

    assert_eq!(
        analysis.result(),
        Err(QuantifyError::DivisionUndefined {
            total: 64,
            exclusion: 64
        })
    );

    let row = ReportRow::new(analysis.filename.clone(), analysis.counts());
    assert_eq!(row.percent_red, None);
    assert_eq!(row.non_tissue_pixel_count, 64);
}

#[test]
fn test_dark_pixels_are_tissue_not_stain() {
    let ws = TestWorkspace::new();
    let path = ws.add_image("debris.png", &fixtures::solid(5, 5, colors::DEBRIS));

    let quantifier = Settings::default().quantifier().unwrap();
    let result = analyze_file(&path, &quantifier).unwrap().result().unwrap();

    assert_eq!(result.signal, 0);
    assert_eq!(result.exclusion, 0);
    assert_eq!(result.ratio, 0.0);
}

#[test]
fn test_unreadable_image_is_load_failure() {
    let ws = TestWorkspace::new();
    let path = ws.add_file("broken.tif", b"II*\0garbage");

    let quantifier = Settings::default().quantifier().unwrap();
    let err = analyze_file(&path, &quantifier).unwrap_err();
    assert!(matches!(err, AnalysisError::ImageLoad { .. }), "{err}");
}

#[test]
fn test_pick_pixel_adds_range_that_matches_it() {
    let ws = TestWorkspace::new();
    let path = ws.add_image("pick.png", &fixtures::slide(4, 4, 4, 4));
    let image = load_image(&path).unwrap();

    let sample = image.sample(0, 0).unwrap();
    assert_eq!(sample.rgb, Rgb8::from_bytes(colors::STAIN));
    assert_eq!(sample.hsv, Hsv8::new(169, 188, 190));

    let mut settings = Settings::default();
    settings.hsv_ranges.red.clear();
    let range = settings.add_range(MaskCategory::Red, sample.hsv, sample.rgb);
    assert_eq!(range.lower(), [159, 148, 150]);
    assert_eq!(range.upper(), [179, 228, 230]);

    let quantifier = settings.quantifier().unwrap();
    let result = analyze_file(&path, &quantifier).unwrap().result().unwrap();
    assert_eq!(result.signal, 4);
}

#[test]
fn test_artifacts_for_single_image() {
    let ws = TestWorkspace::new();
    let path = ws.add_image("slide_7.tif", &fixtures::slide(6, 5, 10, 10));

    let quantifier = Settings::default().quantifier().unwrap();
    let analysis = analyze_file(&path, &quantifier).unwrap();

    let dir = artifact_dir(&ws.output_dir(), &analysis.filename);
    assert_eq!(dir, ws.output_dir().join("slide_7"));

    let written = save_artifacts(&dir, &analysis).unwrap();
    assert_eq!(written.len(), 6);
    for path in &written {
        common::assert_tiff(path, 6, 5);
    }

    let white = image::open(dir.join("slide_7.tif_white_mask_count.tif"))
        .unwrap()
        .to_luma8();
    let included = white.pixels().filter(|p| p.0[0] == 255).count();
    assert_eq!(included, 10);
}
