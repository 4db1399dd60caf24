//! Per-image mask exports.
//!
//! Every analyzed image can be written out as six TIFFs in its own folder so
//! the thresholds can be checked by eye:
//!
//! | suffix                 | content                                  |
//! |------------------------|------------------------------------------|
//! | `_original.tif`        | source RGB                               |
//! | `_hsv.tif`             | raw H, S, V bytes in the RGB channels    |
//! | `_red_mask.tif`        | HSV with non-stain pixels zeroed         |
//! | `_red_mask_count.tif`  | 0/255 stain mask                         |
//! | `_white_mask.tif`      | HSV with tissue pixels zeroed            |
//! | `_white_mask_count.tif`| 0/255 non-tissue mask                    |

use image::{GrayImage, RgbImage};
use stain_mask::{Hsv8, Mask};
use std::path::{Path, PathBuf};

use super::analyzer::ImageAnalysis;
use crate::error::AnalysisError;

/// Folder for one image's artifacts: `<out>/<stem>`.
pub fn artifact_dir(output_dir: &Path, filename: &str) -> PathBuf {
    let stem = match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    };
    output_dir.join(stem)
}

/// Write all six artifacts for `analysis` into `dir`, creating it if needed.
///
/// Returns the written paths in table order.
pub fn save_artifacts(
    dir: &Path,
    analysis: &ImageAnalysis,
) -> Result<Vec<PathBuf>, AnalysisError> {
    std::fs::create_dir_all(dir)?;

    let width = analysis.image.width() as u32;
    let height = analysis.image.height() as u32;
    let hsv = analysis.analysis.hsv();
    let name = &analysis.filename;

    let mut written = Vec::with_capacity(6);

    let original = analysis
        .image
        .to_rgb_image()
        .ok_or_else(|| buffer_mismatch(name))?;
    written.push(save_rgb(dir, name, "original", original)?);

    let raw_hsv =
        rgb_buffer(width, height, hsv.to_packed()).ok_or_else(|| buffer_mismatch(name))?;
    written.push(save_rgb(dir, name, "hsv", raw_hsv)?);

    for (label, mask) in [
        ("red", analysis.analysis.signal_mask()),
        ("white", analysis.analysis.exclusion_mask()),
    ] {
        let masked = masked_hsv(hsv.pixels(), mask);
        let masked = rgb_buffer(width, height, masked).ok_or_else(|| buffer_mismatch(name))?;
        written.push(save_rgb(dir, name, &format!("{label}_mask"), masked)?);

        let luma = GrayImage::from_raw(width, height, mask.to_luma())
            .ok_or_else(|| buffer_mismatch(name))?;
        let path = artifact_path(dir, name, &format!("{label}_mask_count"));
        luma.save(&path).map_err(|source| AnalysisError::ImageSave {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    tracing::debug!(dir = %dir.display(), file = %name, "Saved mask artifacts");
    Ok(written)
}

fn artifact_path(dir: &Path, filename: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{filename}_{suffix}.tif"))
}

fn rgb_buffer(width: u32, height: u32, bytes: Vec<u8>) -> Option<RgbImage> {
    RgbImage::from_raw(width, height, bytes)
}

fn masked_hsv(pixels: &[Hsv8], mask: &Mask) -> Vec<u8> {
    mask.apply(pixels)
        .iter()
        .flat_map(|px| px.to_bytes())
        .collect()
}

fn save_rgb(
    dir: &Path,
    filename: &str,
    suffix: &str,
    image: RgbImage,
) -> Result<PathBuf, AnalysisError> {
    let path = artifact_path(dir, filename, suffix);
    image.save(&path).map_err(|source| AnalysisError::ImageSave {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn buffer_mismatch(filename: &str) -> AnalysisError {
    AnalysisError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("pixel buffer for {filename} does not match its dimensions"),
    ))
}
