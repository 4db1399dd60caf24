use image::RgbImage;
use stain_mask::{
    Analysis, Hsv8, PixelCounts, QuantificationResult, QuantifyError, RegionQuantifier, Rgb8,
};
use std::path::Path;

use crate::error::AnalysisError;

/// A decoded image, row-major RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pixels: Vec<Rgb8>,
    width: usize,
    height: usize,
}

/// RGB and HSV of one pixel, as shown by a color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub rgb: Rgb8,
    pub hsv: Hsv8,
}

impl LoadedImage {
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            pixels: Rgb8::from_packed(image.as_raw()),
            width: width as usize,
            height: height as usize,
        }
    }

    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        RgbImage::from_raw(
            self.width as u32,
            self.height as u32,
            Rgb8::to_packed(&self.pixels),
        )
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample the pixel at column `x`, row `y`.
    pub fn sample(&self, x: usize, y: usize) -> Result<PixelSample, AnalysisError> {
        if x >= self.width || y >= self.height {
            return Err(AnalysisError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let rgb = self.pixels[y * self.width + x];
        Ok(PixelSample {
            rgb,
            hsv: Hsv8::from(rgb),
        })
    }
}

/// Decode an image file into 8-bit RGB.
///
/// Higher bit depths and alpha channels are reduced to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<LoadedImage, AnalysisError> {
    let decoded = image::open(path).map_err(|source| AnalysisError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = decoded.to_rgb8();

    tracing::debug!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        "Decoded image"
    );

    Ok(LoadedImage::from_rgb_image(&rgb))
}

/// File name of `path` for reports and logs.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Source image plus everything derived from it.
#[derive(Debug, Clone)]
pub struct ImageAnalysis {
    pub filename: String,
    pub image: LoadedImage,
    pub analysis: Analysis,
}

impl ImageAnalysis {
    pub fn counts(&self) -> PixelCounts {
        self.analysis.counts()
    }

    pub fn result(&self) -> Result<QuantificationResult, QuantifyError> {
        self.analysis.result()
    }
}

/// Analyze an already decoded image.
pub fn analyze_image(
    filename: impl Into<String>,
    image: LoadedImage,
    quantifier: &RegionQuantifier,
) -> Result<ImageAnalysis, AnalysisError> {
    let analysis = quantifier.analyze(image.pixels(), image.width(), image.height())?;
    let filename = filename.into();

    let counts = analysis.counts();
    tracing::debug!(
        file = %filename,
        red = counts.signal,
        non_tissue = counts.exclusion,
        total = counts.total,
        "Image quantified"
    );

    Ok(ImageAnalysis {
        filename,
        image,
        analysis,
    })
}

/// Load and analyze one file.
pub fn analyze_file(
    path: &Path,
    quantifier: &RegionQuantifier,
) -> Result<ImageAnalysis, AnalysisError> {
    let image = load_image(path)?;
    analyze_image(display_name(path), image, quantifier)
}
