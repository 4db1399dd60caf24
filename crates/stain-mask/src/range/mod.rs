//! HSV color ranges
//!
//! A [`ColorRange`] is an axis-aligned box in HSV space with inclusive
//! bounds on every channel. Ranges are validated on construction so that a
//! malformed definition is rejected before any image is processed.

mod color_range;
mod error;

pub use color_range::{Channel, ColorRange};
pub use error::RangeError;
