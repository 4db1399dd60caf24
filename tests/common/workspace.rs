//! Temporary input/output folders for batch tests.

use image::RgbImage;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory with an `input/` and an `output/` folder.
pub struct TestWorkspace {
    root: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(root.path().join("input")).expect("create input dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.path().join("input")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("output")
    }

    /// Save `image` into the input folder; format follows the extension.
    pub fn add_image(&self, name: &str, image: &RgbImage) -> PathBuf {
        let path = self.input_dir().join(name);
        image.save(&path).expect("write test image");
        path
    }

    /// Write raw bytes into the input folder.
    pub fn add_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.input_dir().join(name);
        std::fs::write(&path, contents).expect("write test file");
        path
    }

    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output_dir().join(name)).expect("read output file")
    }
}
