use crate::api::QuantifyError;
use crate::color::{Hsv8, Rgb8};

/// An image converted to HSV, one pixel per entry in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct HsvImage {
    pixels: Vec<Hsv8>,
    width: usize,
    height: usize,
}

impl HsvImage {
    /// Convert RGB pixels in row-major order.
    ///
    /// Fails with [`QuantifyError::DimensionMismatch`] if `pixels.len()` is
    /// not `width * height`.
    pub fn from_rgb(pixels: &[Rgb8], width: usize, height: usize) -> Result<Self, QuantifyError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(QuantifyError::DimensionMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels: pixels.iter().map(|&px| Hsv8::from(px)).collect(),
            width,
            height,
        })
    }

    #[inline]
    pub fn pixels(&self) -> &[Hsv8] {
        &self.pixels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at column `x`, row `y`, if inside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<Hsv8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Packed `[H, S, V, ...]` bytes, for writing the image out as-is.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            out.extend_from_slice(&px.to_bytes());
        }
        out
    }
}
