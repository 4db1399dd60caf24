use std::fmt;

use super::error::RangeError;
use crate::color::Hsv8;

/// One of the three HSV channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Hue,
    Saturation,
    Value,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Hue, Channel::Saturation, Channel::Value];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Hue => "H",
            Channel::Saturation => "S",
            Channel::Value => "V",
        };
        f.write_str(name)
    }
}

/// An inclusive box in HSV space.
///
/// A pixel is inside the range when every channel lies within
/// `lower..=upper` for that channel.
///
/// # Example
///
/// ```
/// use stain_mask::{ColorRange, Hsv8};
///
/// let range = ColorRange::new([154, 118, 106], [194, 249, 206]).unwrap();
/// assert!(range.contains(Hsv8::new(169, 188, 190)));
/// assert!(!range.contains(Hsv8::new(20, 33, 230)));
///
/// assert!(ColorRange::new([10, 0, 0], [5, 255, 255]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRange {
    lower: [u8; 3],
    upper: [u8; 3],
}

impl ColorRange {
    /// Create a range from `[H, S, V]` bounds.
    ///
    /// Returns [`RangeError::InvertedBounds`] when a lower bound exceeds the
    /// matching upper bound.
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self, RangeError> {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            if lower[i] > upper[i] {
                return Err(RangeError::InvertedBounds {
                    channel: *channel,
                    lower: lower[i],
                    upper: upper[i],
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// The range covering every representable HSV triple.
    pub const fn full() -> Self {
        Self {
            lower: [0, 0, 0],
            upper: [255, 255, 255],
        }
    }

    /// Range centered on a sampled pixel, widened by `tolerance` per channel.
    ///
    /// Bounds saturate at 0 and 255, so the result is always valid.
    ///
    /// ```
    /// use stain_mask::{ColorRange, Hsv8};
    ///
    /// let range = ColorRange::around(Hsv8::new(5, 250, 100), [10, 40, 40]);
    /// assert_eq!(range.lower(), [0, 210, 60]);
    /// assert_eq!(range.upper(), [15, 255, 140]);
    /// ```
    pub fn around(center: Hsv8, tolerance: [u8; 3]) -> Self {
        let c = center.to_bytes();
        let mut lower = [0u8; 3];
        let mut upper = [0u8; 3];
        for i in 0..3 {
            lower[i] = c[i].saturating_sub(tolerance[i]);
            upper[i] = c[i].saturating_add(tolerance[i]);
        }
        Self { lower, upper }
    }

    #[inline]
    pub fn lower(&self) -> [u8; 3] {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> [u8; 3] {
        self.upper
    }

    /// Inclusive per-channel bound test.
    #[inline]
    pub fn contains(&self, px: Hsv8) -> bool {
        px.h >= self.lower[0]
            && px.h <= self.upper[0]
            && px.s >= self.lower[1]
            && px.s <= self.upper[1]
            && px.v >= self.lower[2]
            && px.v <= self.upper[2]
    }
}

impl fmt::Display for ColorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]..=[{}, {}, {}]",
            self.lower[0], self.lower[1], self.lower[2], self.upper[0], self.upper[1], self.upper[2]
        )
    }
}
