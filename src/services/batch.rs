use rayon::prelude::*;
use stain_mask::{QuantifyError, RegionQuantifier};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::analyzer::{analyze_file, display_name};
use super::artifacts::{artifact_dir, save_artifacts};
use crate::error::BatchError;
use crate::models::{Report, ReportRow, Settings};

pub const REPORT_FILE: &str = "PSR_results.csv";
pub const SETTINGS_FILE: &str = "image_settings.json";
pub const DEFAULT_EXTENSION: &str = ".tif";

/// What to process and where to put the results.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    /// Filename suffix, e.g. `.tif`. Matched case-sensitively.
    pub extension: String,
    pub output_dir: PathBuf,
    pub save_artifacts: bool,
    /// Worker threads; `None` lets rayon pick one per core.
    pub threads: Option<usize>,
}

impl BatchOptions {
    /// Defaults: `.tif` inputs, results written next to them, no artifacts.
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        Self {
            output_dir: input_dir.clone(),
            input_dir,
            extension: DEFAULT_EXTENSION.to_string(),
            save_artifacts: false,
            threads: None,
        }
    }
}

/// Progress shared between a running batch and whoever watches it.
#[derive(Debug, Default)]
pub struct BatchProgress {
    processed: AtomicUsize,
    total: AtomicUsize,
    cancelled: AtomicBool,
}

impl BatchProgress {
    fn start(&self, total: usize) {
        self.processed.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
    }

    fn advance(&self) -> usize {
        self.processed.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Share of images finished, `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.processed() as f64 / total as f64,
        }
    }

    /// Stop picking up new images. Images already being analyzed finish.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub filename: String,
    pub error: String,
}

/// Outcome of a finished (or cancelled) batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One row per analyzed image, in input order
    pub rows: Vec<ReportRow>,
    pub failures: Vec<BatchFailure>,
    /// Images never started because the batch was cancelled
    pub skipped: usize,
    pub report_path: PathBuf,
    pub settings_path: PathBuf,
}

impl BatchReport {
    pub fn was_cancelled(&self) -> bool {
        self.skipped > 0
    }
}

/// Files in `dir` whose name ends with `extension`, sorted by name.
/// Subdirectories are not searched.
pub fn list_images(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::InputNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(extension) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Default)]
struct ItemOutcome {
    row: Option<ReportRow>,
    failure: Option<BatchFailure>,
}

fn process_one(
    path: &Path,
    quantifier: &RegionQuantifier,
    options: &BatchOptions,
    progress: &BatchProgress,
) -> ItemOutcome {
    if progress.is_cancelled() {
        return ItemOutcome::default();
    }

    let filename = display_name(path);
    let mut outcome = ItemOutcome::default();

    match analyze_file(path, quantifier) {
        Ok(analysis) => {
            let counts = analysis.counts();
            if let Err(e @ QuantifyError::DivisionUndefined { .. }) = counts.ratio() {
                tracing::warn!(file = %filename, "{e}");
            }
            outcome.row = Some(ReportRow::new(filename.clone(), counts));

            if options.save_artifacts {
                let dir = artifact_dir(&options.output_dir, &filename);
                if let Err(e) = save_artifacts(&dir, &analysis) {
                    tracing::warn!(file = %filename, "Failed to save artifacts: {e}");
                    outcome.failure = Some(BatchFailure {
                        filename: filename.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        Err(e) => {
            tracing::warn!(file = %filename, "Skipping image: {e}");
            outcome.failure = Some(BatchFailure {
                filename: filename.clone(),
                error: e.to_string(),
            });
        }
    }

    let done = progress.advance();
    tracing::debug!(file = %filename, "[{done}/{}] processed", progress.total());
    outcome
}

/// Quantify every matching image in `options.input_dir`.
///
/// Images are analyzed in parallel; a failing image is recorded and the
/// rest carry on. Rows are written once at the end, in input order, to
/// [`REPORT_FILE`] with the settings used saved as [`SETTINGS_FILE`].
pub fn run_batch(
    options: &BatchOptions,
    settings: &Settings,
    progress: &BatchProgress,
) -> Result<BatchReport, BatchError> {
    let quantifier = settings.quantifier()?;
    let inputs = list_images(&options.input_dir, &options.extension)?;
    if inputs.is_empty() {
        return Err(BatchError::NoInputs {
            dir: options.input_dir.clone(),
            extension: options.extension.clone(),
        });
    }

    std::fs::create_dir_all(&options.output_dir)?;
    progress.start(inputs.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or(0))
        .build()?;

    tracing::info!(
        images = inputs.len(),
        threads = pool.current_num_threads(),
        input = %options.input_dir.display(),
        "Starting batch"
    );

    let outcomes: Vec<ItemOutcome> = pool.install(|| {
        inputs
            .par_iter()
            .map(|path| process_one(path, &quantifier, options, progress))
            .collect()
    });

    let mut rows = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    let mut skipped = 0;
    for outcome in outcomes {
        match (outcome.row, outcome.failure) {
            (None, None) => skipped += 1,
            (row, failure) => {
                rows.extend(row);
                failures.extend(failure);
            }
        }
    }

    let report_path = options.output_dir.join(REPORT_FILE);
    Report::new(rows.clone())
        .save_csv(&report_path)
        .map_err(|source| BatchError::Report {
            path: report_path.clone(),
            source,
        })?;

    let settings_path = options.output_dir.join(SETTINGS_FILE);
    settings.save(&settings_path)?;

    if skipped > 0 {
        tracing::info!(skipped, "Batch cancelled");
    }
    tracing::info!(
        rows = rows.len(),
        failures = failures.len(),
        report = %report_path.display(),
        "Batch finished"
    );

    Ok(BatchReport {
        rows,
        failures,
        skipped,
        report_path,
        settings_path,
    })
}

/// Run a batch on a background thread. Poll the returned progress and join
/// the handle for the result.
pub fn spawn_batch(
    options: BatchOptions,
    settings: Settings,
) -> (JoinHandle<Result<BatchReport, BatchError>>, Arc<BatchProgress>) {
    let progress = Arc::new(BatchProgress::default());
    let worker = Arc::clone(&progress);
    let handle = std::thread::spawn(move || run_batch(&options, &settings, &worker));
    (handle, progress)
}
