//! 8-bit HSV color type
//!
//! Hue is stored in half-degrees (`0..180`) so that it fits a byte, with
//! saturation and value on the full `0..=255` scale.

use std::fmt;

use super::rgb::Rgb8;

/// Number of distinct hue values in the 8-bit encoding.
pub(crate) const HUE_STEPS: u16 = 180;

/// A pixel in 8-bit HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsv8 {
    /// Hue in half-degrees (0..180)
    pub h: u8,
    /// Saturation (0..=255)
    pub s: u8,
    /// Value (0..=255)
    pub v: u8,
}

impl Hsv8 {
    #[inline]
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Channels as `[H, S, V]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.h, self.s, self.v]
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl From<Rgb8> for Hsv8 {
    /// Convert from RGB.
    ///
    /// When two channels tie for the maximum, red wins over green and green
    /// over blue. Achromatic pixels get hue 0.
    fn from(rgb: Rgb8) -> Self {
        let (r, g, b) = (rgb.r as i32, rgb.g as i32, rgb.b as i32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0 {
            0
        } else {
            // round-half-up of 255 * delta / max
            ((510 * delta + max) / (2 * max)) as u8
        };

        let h = if delta == 0 {
            0
        } else {
            let d = delta as f32;
            let mut deg = if max == r {
                60.0 * (g - b) as f32 / d
            } else if max == g {
                120.0 + 60.0 * (b - r) as f32 / d
            } else {
                240.0 + 60.0 * (r - g) as f32 / d
            };
            if deg < 0.0 {
                deg += 360.0;
            }
            let half = (deg / 2.0).round() as u16;
            (half % HUE_STEPS) as u8
        };

        Self::new(h, s, max as u8)
    }
}

impl fmt::Display for Hsv8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.h, self.s, self.v)
    }
}
