//! 8-bit RGB color type

use std::fmt;

/// A pixel in 8-bit RGB.
///
/// This is the representation image decoders hand out and the one used for
/// UI swatches in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Rgb8 color from a byte array [R, G, B].
    ///
    /// # Example
    /// ```
    /// use stain_mask::Rgb8;
    /// let white = Rgb8::from_bytes([255, 255, 255]);
    /// assert_eq!(white.g, 255);
    /// ```
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Reinterpret a packed `[R, G, B, R, G, B, ...]` buffer as pixels.
    ///
    /// Trailing bytes that do not form a full pixel are ignored.
    pub fn from_packed(bytes: &[u8]) -> Vec<Self> {
        bytes
            .chunks_exact(3)
            .map(|px| Self::new(px[0], px[1], px[2]))
            .collect()
    }

    /// Flatten pixels into a packed `[R, G, B, ...]` buffer.
    pub fn to_packed(pixels: &[Self]) -> Vec<u8> {
        let mut out = Vec::with_capacity(pixels.len() * 3);
        for px in pixels {
            out.extend_from_slice(&px.to_bytes());
        }
        out
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_round_trip_layout() {
        let bytes = [1, 2, 3, 4, 5, 6, 7];
        let pixels = Rgb8::from_packed(&bytes);
        assert_eq!(pixels, vec![Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)]);
        assert_eq!(Rgb8::to_packed(&pixels), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgb8::new(255, 0, 16).to_hex(), "#ff0010");
    }
}
