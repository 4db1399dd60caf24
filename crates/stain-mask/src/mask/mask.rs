//! Boolean mask with dimension metadata.

/// A boolean grid marking pixels that matched a color criterion.
///
/// Stored row-major with the width and height of the image it was built
/// from, so a mask can always be laid back over its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Vec<bool>,
    width: usize,
    height: usize,
}

impl Mask {
    /// Create a mask from row-major bits.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `bits.len() == width * height`.
    pub fn new(bits: Vec<bool>, width: usize, height: usize) -> Self {
        debug_assert_eq!(
            bits.len(),
            width * height,
            "mask length ({}) must match width * height ({}x{}={})",
            bits.len(),
            width,
            height,
            width * height,
        );
        Self {
            bits,
            width,
            height,
        }
    }

    /// All-excluded mask.
    pub fn empty(width: usize, height: usize) -> Self {
        Self::new(vec![false; width * height], width, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    /// Whether the pixel at column `x`, row `y` is included.
    ///
    /// Out-of-bounds coordinates read as excluded.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Number of included pixels.
    pub fn included_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of excluded pixels (the complement).
    pub fn excluded_count(&self) -> usize {
        self.bits.len() - self.included_count()
    }

    /// Render as 8-bit luma: 255 where included, 0 elsewhere.
    pub fn to_luma(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| if b { 255 } else { 0 }).collect()
    }

    /// Keep `pixels` where the mask is set and replace the rest with
    /// `T::default()`.
    ///
    /// `pixels` must be laid out like the mask; extra entries are dropped.
    pub fn apply<T: Copy + Default>(&self, pixels: &[T]) -> Vec<T> {
        self.bits
            .iter()
            .zip(pixels)
            .map(|(&keep, &px)| if keep { px } else { T::default() })
            .collect()
    }
}
