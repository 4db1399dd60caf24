//! Color types and conversion utilities
//!
//! This module provides the two pixel representations the quantifier works
//! with:
//!
//! - **Rgb8**: device color as decoded from image files. Use for I/O.
//! - **Hsv8**: perceptual color used for range thresholding.
//!
//! # Example
//!
//! ```
//! use stain_mask::{Hsv8, Rgb8};
//!
//! let rgb = Rgb8::new(255, 0, 0);
//! let hsv = Hsv8::from(rgb);
//! assert_eq!(hsv, Hsv8::new(0, 255, 255));
//! ```

mod hsv;
mod rgb;

pub use hsv::Hsv8;
pub use rgb::Rgb8;
