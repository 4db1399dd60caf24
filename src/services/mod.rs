pub mod analyzer;
pub mod artifacts;
pub mod batch;

pub use analyzer::{
    analyze_file, analyze_image, display_name, load_image, ImageAnalysis, LoadedImage,
    PixelSample,
};
pub use artifacts::{artifact_dir, save_artifacts};
pub use batch::{
    list_images, run_batch, spawn_batch, BatchFailure, BatchOptions, BatchProgress, BatchReport,
    DEFAULT_EXTENSION, REPORT_FILE, SETTINGS_FILE,
};
