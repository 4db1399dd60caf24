//! Masks over HSV images.
//!
//! [`HsvImage`] is the converted form of a decoded image. [`build_mask`]
//! thresholds it against the ranges of one category and yields a [`Mask`]
//! with the same dimensions.

mod hsv_image;
mod mask;

pub use hsv_image::HsvImage;
pub use mask::Mask;

use crate::range::ColorRange;

/// Build the mask of pixels inside any of `ranges`.
///
/// Ranges are OR-ed; each range tests all three channels. An empty slice
/// yields an all-excluded mask.
///
/// # Example
///
/// ```
/// use stain_mask::{build_mask, ColorRange, HsvImage, Rgb8};
///
/// let pixels = [Rgb8::new(255, 0, 0), Rgb8::new(0, 0, 255)];
/// let hsv = HsvImage::from_rgb(&pixels, 2, 1).unwrap();
///
/// let reds = ColorRange::new([0, 100, 100], [10, 255, 255]).unwrap();
/// let mask = build_mask(&hsv, &[reds]);
///
/// assert_eq!(mask.included_count(), 1);
/// assert!(mask.get(0, 0));
/// assert!(!mask.get(1, 0));
/// ```
pub fn build_mask(image: &HsvImage, ranges: &[ColorRange]) -> Mask {
    let bits = image
        .pixels()
        .iter()
        .map(|&px| ranges.iter().any(|range| range.contains(px)))
        .collect();
    Mask::new(bits, image.width(), image.height())
}
