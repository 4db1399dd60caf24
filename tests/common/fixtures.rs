//! Test fixtures and constants.

use image::{Rgb, RgbImage};

/// Pixel colors with known HSV values under the default settings.
pub mod colors {
    /// Picrosirius red, HSV (169, 188, 190): inside the default red range
    pub const STAIN: [u8; 3] = [190, 50, 100];

    /// Slide background, HSV (20, 33, 230): inside the default white range
    pub const BACKGROUND: [u8; 3] = [230, 220, 200];

    /// Pale tissue, HSV (0, 0, 255): in neither default range
    pub const TISSUE: [u8; 3] = [255, 255, 255];

    /// Dark debris, HSV (0, 0, 20): in neither default range
    pub const DEBRIS: [u8; 3] = [20, 20, 20];
}

/// Image whose first `stain` pixels (row-major) are stain, the next
/// `background` are background and the rest plain tissue.
pub fn slide(width: u32, height: u32, stain: u32, background: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let i = y * width + x;
        if i < stain {
            Rgb(colors::STAIN)
        } else if i < stain + background {
            Rgb(colors::BACKGROUND)
        } else {
            Rgb(colors::TISSUE)
        }
    })
}

/// Image of a single color.
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// JSON settings as written by older versions: no tolerances, swatches on
/// some ranges.
pub const LEGACY_SETTINGS_JSON: &str = r#"{
    "hsv_ranges": {
        "red": [
            {"lower": [154, 118, 106], "upper": [194, 249, 206], "rgb": [190, 50, 100]}
        ],
        "white": [
            {"lower": [6, 0, 145], "upper": [46, 40, 245]}
        ]
    }
}"#;

pub const SETTINGS_YAML: &str = "\
red_tolerances:
  h: 5.0
  s: 20.0
  v: 20.0
hsv_ranges:
  red:
    - lower: [154, 118, 106]
      upper: [194, 249, 206]
  white:
    - lower: [6, 0, 145]
      upper: [46, 40, 245]
";
