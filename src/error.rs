use std::path::PathBuf;

use stain_mask::{QuantifyError, RangeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write settings {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid {category} range #{index}: {source}")]
    Range {
        category: &'static str,
        index: usize,
        source: RangeError,
    },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("No {category} range at index {index}")]
    NoSuchRange {
        category: &'static str,
        index: usize,
    },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Quantification error: {0}")]
    Quantify(#[from] QuantifyError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Input folder not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No files ending in \"{extension}\" found in {}", .dir.display())]
    NoInputs { dir: PathBuf, extension: String },

    #[error("Failed to configure thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] SettingsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
