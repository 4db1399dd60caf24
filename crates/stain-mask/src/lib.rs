#![allow(clippy::manual_range_contains, clippy::module_inception)]

//! stain-mask: HSV range masking and stained-area quantification
//!
//! This library converts 8-bit RGB pixels to HSV, builds boolean masks from
//! inclusive HSV boxes, and derives the stained fraction of the tissue area
//! of an image.
//!
//! # Quick Start
//!
//! The [`RegionQuantifier`] is the primary entry point:
//!
//! ```
//! use stain_mask::{Category, ColorRange, RegionQuantifier, Rgb8};
//!
//! let red = ColorRange::new([154, 118, 106], [194, 249, 206]).unwrap();
//! let white = ColorRange::new([6, 0, 145], [46, 40, 245]).unwrap();
//!
//! let quantifier = RegionQuantifier::new(
//!     Category::new("red", vec![red]),
//!     Category::new("white", vec![white]),
//! );
//!
//! let pixels = vec![Rgb8::new(190, 50, 100); 4];
//! let result = quantifier.quantify(&pixels, 2, 2).unwrap();
//!
//! assert_eq!(result.signal, 4);
//! assert_eq!(result.ratio, 1.0);
//! ```
//!
//! # HSV Encoding
//!
//! [`Hsv8`] follows the 8-bit convention of common vision libraries so that
//! ranges tuned elsewhere carry over unchanged:
//!
//! | Channel | Range | Meaning |
//! |---------|-------|---------|
//! | H | `0..180` | hue in degrees, halved |
//! | S | `0..=255` | `255 * (max - min) / max` |
//! | V | `0..=255` | `max(r, g, b)` |
//!
//! A [`ColorRange`] may still carry hue bounds above 179 (stain presets often
//! do); such a bound simply reaches the top of the hue circle.
//!
//! # Ratio
//!
//! The quantified ratio is `signal / (total - exclusion)`: stained pixels
//! over tissue pixels, where tissue is everything not matched by the
//! exclusion (background) category. When the exclusion mask covers the
//! whole image the ratio has no meaning and
//! [`QuantifyError::DivisionUndefined`] is returned instead of an infinity
//! or NaN.

pub mod api;
pub mod color;
pub mod mask;
pub mod range;


pub use api::{
    quantify, Analysis, Category, PixelCounts, QuantificationResult, QuantifyError,
    RegionQuantifier,
};
pub use color::{Hsv8, Rgb8};
pub use mask::{build_mask, HsvImage, Mask};
pub use range::{Channel, ColorRange, RangeError};
