use serde::Serialize;
use stain_mask::PixelCounts;
use std::io::{self, Write};
use std::path::Path;

/// Column order of the results table.
pub const REPORT_COLUMNS: [&str; 5] = [
    "filename",
    "red_pixel_count",
    "non_tissue_pixel_count",
    "total_pixel_count",
    "percent_red",
];

/// Written in place of the ratio when an image has no tissue area.
pub const UNDEFINED_RATIO: &str = "undefined";

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub filename: String,
    pub red_pixel_count: usize,
    pub non_tissue_pixel_count: usize,
    pub total_pixel_count: usize,
    /// `red / (total - non_tissue)` as a fraction; `None` when undefined
    pub percent_red: Option<f64>,
}

impl ReportRow {
    pub fn new(filename: impl Into<String>, counts: PixelCounts) -> Self {
        Self {
            filename: filename.into(),
            red_pixel_count: counts.signal,
            non_tissue_pixel_count: counts.exclusion,
            total_pixel_count: counts.total,
            percent_red: counts.ratio().ok(),
        }
    }

    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let ratio = match self.percent_red {
            Some(r) => r.to_string(),
            None => UNDEFINED_RATIO.to_string(),
        };
        writeln!(
            out,
            "{},{},{},{},{}",
            csv_field(&self.filename),
            self.red_pixel_count,
            self.non_tissue_pixel_count,
            self.total_pixel_count,
            ratio
        )
    }
}

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Results table for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", REPORT_COLUMNS.join(","))?;
        for row in &self.rows {
            row.write_csv(&mut out)?;
        }
        out.flush()
    }

    pub fn save_csv(&self, path: &Path) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}
