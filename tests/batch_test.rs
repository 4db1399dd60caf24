//! Folder batches: report contents, failure isolation, progress.

mod common;

use common::{fixtures, fixtures::colors, TestWorkspace};
use pretty_assertions::assert_eq;
use stainquant::error::BatchError;
use stainquant::models::{Settings, UNDEFINED_RATIO};
use stainquant::services::{
    run_batch, spawn_batch, BatchOptions, BatchProgress, REPORT_FILE, SETTINGS_FILE,
};

fn options(ws: &TestWorkspace) -> BatchOptions {
    let mut options = BatchOptions::new(ws.input_dir());
    options.output_dir = ws.output_dir();
    options
}

#[test]
fn test_batch_writes_rows_in_name_order() {
    let ws = TestWorkspace::new();
    ws.add_image("c.tif", &fixtures::slide(10, 10, 10, 50));
    ws.add_image("a.tif", &fixtures::slide(10, 10, 40, 20));
    ws.add_image("b.tif", &fixtures::slide(10, 10, 0, 0));
    ws.add_image("ignored.png", &fixtures::slide(10, 10, 100, 0));

    let report = run_batch(&options(&ws), &Settings::default(), &BatchProgress::default())
        .unwrap();
    assert_eq!(report.rows.len(), 3);
    assert!(report.failures.is_empty());
    assert_eq!(report.report_path, ws.output_dir().join(REPORT_FILE));

    let rows = common::parse_report(&ws.read_output(REPORT_FILE));
    assert_eq!(rows.len(), 3);
    common::assert_row(&rows[0], "a.tif", 40, 20, 100);
    common::assert_ratio(&rows[0], 0.5);
    common::assert_row(&rows[1], "b.tif", 0, 0, 100);
    common::assert_ratio(&rows[1], 0.0);
    common::assert_row(&rows[2], "c.tif", 10, 50, 100);
    common::assert_ratio(&rows[2], 0.2);
}

#[test]
fn test_batch_saves_settings_used() {
    let ws = TestWorkspace::new();
    ws.add_image("a.tif", &fixtures::slide(4, 4, 4, 4));

    let mut settings = Settings::default();
    settings.red_tolerances.h = 3.0;
    run_batch(&options(&ws), &settings, &BatchProgress::default()).unwrap();

    let saved = Settings::load(&ws.output_dir().join(SETTINGS_FILE)).unwrap();
    assert_eq!(saved, settings);
}

#[test]
fn test_unreadable_image_does_not_stop_batch() {
    let ws = TestWorkspace::new();
    ws.add_image("good.tif", &fixtures::slide(5, 5, 5, 5));
    ws.add_file("bad.tif", b"this is not a tiff");

    let report = run_batch(&options(&ws), &Settings::default(), &BatchProgress::default())
        .unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].filename, "good.tif");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].filename, "bad.tif");

    let rows = common::parse_report(&ws.read_output(REPORT_FILE));
    assert_eq!(rows.len(), 1);
    common::assert_row(&rows[0], "good.tif", 5, 5, 25);
}

#[test]
fn test_all_background_image_reports_undefined() {
    let ws = TestWorkspace::new();
    ws.add_image("empty_slide.tif", &fixtures::solid(6, 6, colors::BACKGROUND));

    let report = run_batch(&options(&ws), &Settings::default(), &BatchProgress::default())
        .unwrap();
    assert_eq!(report.rows[0].percent_red, None);
    assert!(report.failures.is_empty());

    let rows = common::parse_report(&ws.read_output(REPORT_FILE));
    common::assert_row(&rows[0], "empty_slide.tif", 0, 36, 36);
    assert_eq!(rows[0][4], UNDEFINED_RATIO);
}

#[test]
fn test_custom_extension() {
    let ws = TestWorkspace::new();
    ws.add_image("a.png", &fixtures::slide(4, 4, 8, 0));
    ws.add_image("b.tif", &fixtures::slide(4, 4, 0, 0));

    let mut options = options(&ws);
    options.extension = ".png".to_string();
    let report = run_batch(&options, &Settings::default(), &BatchProgress::default()).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].filename, "a.png");
    assert_eq!(report.rows[0].red_pixel_count, 8);
}

#[test]
fn test_batch_with_artifacts() {
    let ws = TestWorkspace::new();
    ws.add_image("one.tif", &fixtures::slide(3, 3, 3, 3));
    ws.add_image("two.tif", &fixtures::slide(3, 3, 0, 9));

    let mut options = options(&ws);
    options.save_artifacts = true;
    let report = run_batch(&options, &Settings::default(), &BatchProgress::default()).unwrap();
    assert!(report.failures.is_empty());

    for stem in ["one", "two"] {
        let dir = ws.output_dir().join(stem);
        for suffix in [
            "original",
            "hsv",
            "red_mask",
            "red_mask_count",
            "white_mask",
            "white_mask_count",
        ] {
            common::assert_tiff(&dir.join(format!("{stem}.tif_{suffix}.tif")), 3, 3);
        }
    }
}

#[test]
fn test_empty_folder_is_an_error() {
    let ws = TestWorkspace::new();
    let err = run_batch(&options(&ws), &Settings::default(), &BatchProgress::default())
        .unwrap_err();
    assert!(matches!(err, BatchError::NoInputs { .. }), "{err}");
    assert!(!ws.output_dir().join(REPORT_FILE).exists());
}

#[test]
fn test_missing_folder_is_an_error() {
    let ws = TestWorkspace::new();
    let options = BatchOptions::new(ws.root().join("does-not-exist"));
    let err = run_batch(&options, &Settings::default(), &BatchProgress::default()).unwrap_err();
    assert!(matches!(err, BatchError::InputNotFound(_)), "{err}");
}

#[test]
fn test_invalid_settings_rejected_before_processing() {
    let ws = TestWorkspace::new();
    ws.add_image("a.tif", &fixtures::slide(4, 4, 4, 4));

    let mut settings = Settings::default();
    settings.hsv_ranges.red[0].lower = [200, 0, 0];
    let err = run_batch(&options(&ws), &settings, &BatchProgress::default()).unwrap_err();

    assert!(matches!(err, BatchError::Configuration(_)), "{err}");
    assert!(!ws.output_dir().exists());
}

#[test]
fn test_thread_count_does_not_change_results() {
    let ws = TestWorkspace::new();
    for i in 0..12 {
        ws.add_image(&format!("img_{i:02}.tif"), &fixtures::slide(8, 8, i * 4, 8));
    }

    let mut single = options(&ws);
    single.threads = Some(1);
    let mut parallel = options(&ws);
    parallel.threads = Some(4);

    let settings = Settings::default();
    let a = run_batch(&single, &settings, &BatchProgress::default()).unwrap();
    let b = run_batch(&parallel, &settings, &BatchProgress::default()).unwrap();
    assert_eq!(a.rows, b.rows);
}

#[test]
fn test_spawned_batch_reports_progress() {
    let ws = TestWorkspace::new();
    for i in 0..5 {
        ws.add_image(&format!("{i}.tif"), &fixtures::slide(16, 16, 32, 32));
    }

    let (handle, progress) = spawn_batch(options(&ws), Settings::default());
    let report = handle.join().unwrap().unwrap();

    assert_eq!(report.rows.len(), 5);
    assert_eq!(progress.total(), 5);
    assert_eq!(progress.processed(), 5);
    assert_eq!(progress.fraction(), 1.0);
    assert!(!report.was_cancelled());
}
