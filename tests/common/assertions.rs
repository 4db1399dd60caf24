//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;

use stainquant::models::REPORT_COLUMNS;

/// Split a results CSV into rows of fields, checking the header.
pub fn parse_report(csv: &str) -> Vec<Vec<String>> {
    let mut lines = csv.lines();
    let header = lines.next().expect("report has a header line");
    assert_eq!(header, REPORT_COLUMNS.join(","), "unexpected report header");
    lines
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

/// Assert a report row has the given filename and counts.
pub fn assert_row(row: &[String], filename: &str, red: usize, non_tissue: usize, total: usize) {
    assert_eq!(row.len(), REPORT_COLUMNS.len(), "row {row:?}");
    assert_eq!(row[0], filename);
    assert_eq!(row[1], red.to_string(), "red count of {filename}");
    assert_eq!(row[2], non_tissue.to_string(), "non-tissue count of {filename}");
    assert_eq!(row[3], total.to_string(), "total count of {filename}");
}

/// Assert the ratio column parses to `expected` (within float noise).
pub fn assert_ratio(row: &[String], expected: f64) {
    let ratio: f64 = row[4]
        .parse()
        .unwrap_or_else(|_| panic!("ratio {:?} is not a number", row[4]));
    assert!(
        (ratio - expected).abs() < 1e-12,
        "expected ratio {expected}, got {ratio}"
    );
}

/// Assert `path` is a TIFF file of the given size.
pub fn assert_tiff(path: &Path, width: u32, height: u32) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
    assert!(
        bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"),
        "{} is not a TIFF",
        path.display()
    );
    let image = image::open(path).expect("decode TIFF");
    assert_eq!((image.width(), image.height()), (width, height));
}
