//! Unified error type for the stain-mask public API.

use crate::range::RangeError;
use std::fmt;

/// Unified error type for the stain-mask public API.
///
/// # Example
///
/// ```
/// use stain_mask::{ColorRange, QuantifyError};
///
/// fn red() -> Result<ColorRange, QuantifyError> {
///     Ok(ColorRange::new([154, 118, 106], [194, 249, 206])?)
/// }
/// assert!(red().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantifyError {
    /// Pixel buffer length does not match the declared dimensions
    DimensionMismatch {
        /// `width * height`
        expected: usize,
        /// Length of the buffer handed in
        actual: usize,
    },
    /// The exclusion category covers the whole image, so there is no
    /// tissue area to divide by
    DivisionUndefined {
        /// Total pixel count
        total: usize,
        /// Excluded pixel count (equal to `total`)
        exclusion: usize,
    },
    /// Malformed range definition
    Range(RangeError),
}

impl fmt::Display for QuantifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantifyError::DimensionMismatch { expected, actual } => write!(
                f,
                "pixel buffer holds {} pixels, dimensions require {}",
                actual, expected
            ),
            QuantifyError::DivisionUndefined { total, exclusion } => write!(
                f,
                "ratio undefined: exclusion covers {} of {} pixels",
                exclusion, total
            ),
            QuantifyError::Range(err) => write!(f, "range error: {}", err),
        }
    }
}

impl std::error::Error for QuantifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantifyError::Range(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RangeError> for QuantifyError {
    fn from(err: RangeError) -> Self {
        QuantifyError::Range(err)
    }
}
