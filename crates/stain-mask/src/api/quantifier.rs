//! RegionQuantifier builder -- the primary entry point for the crate.

use super::error::QuantifyError;
use super::result::{Analysis, QuantificationResult};
use crate::color::Rgb8;
use crate::mask::{build_mask, HsvImage};
use crate::range::ColorRange;

/// A named set of color ranges.
///
/// A pixel belongs to the category when it falls inside any of its ranges.
/// Several ranges model multi-cluster colors or a hue that wraps around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    ranges: Vec<ColorRange>,
}

impl Category {
    pub fn new(name: impl Into<String>, ranges: Vec<ColorRange>) -> Self {
        Self {
            name: name.into(),
            ranges,
        }
    }

    /// Category without ranges; it matches nothing.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ranges(&self) -> &[ColorRange] {
        &self.ranges
    }

    /// Add a range, consuming and returning `self`.
    pub fn with_range(mut self, range: ColorRange) -> Self {
        self.ranges.push(range);
        self
    }
}

/// Stained-area quantifier for one pair of categories.
///
/// # Design
///
/// - Constructor requires both categories (signal and exclusion)
/// - [`quantify()`](Self::quantify) and [`analyze()`](Self::analyze) take
///   `&self`, so one quantifier serves any number of images
/// - Holds no mutable state and is `Send + Sync`; batch drivers may share a
///   single instance across worker threads
///
/// # Example
///
/// ```
/// use stain_mask::{Category, ColorRange, QuantifyError, RegionQuantifier, Rgb8};
///
/// let quantifier = RegionQuantifier::new(
///     Category::empty("red"),
///     Category::new("white", vec![ColorRange::full()]),
/// );
///
/// let pixels = vec![Rgb8::new(10, 20, 30); 6];
/// let err = quantifier.quantify(&pixels, 3, 2).unwrap_err();
/// assert!(matches!(err, QuantifyError::DivisionUndefined { total: 6, exclusion: 6 }));
/// ```
#[derive(Debug, Clone)]
pub struct RegionQuantifier {
    signal: Category,
    exclusion: Category,
}

impl RegionQuantifier {
    pub fn new(signal: Category, exclusion: Category) -> Self {
        Self { signal, exclusion }
    }

    #[inline]
    pub fn signal(&self) -> &Category {
        &self.signal
    }

    #[inline]
    pub fn exclusion(&self) -> &Category {
        &self.exclusion
    }

    /// Convert once, mask both categories, keep the intermediates.
    ///
    /// Only fails on a pixel buffer that does not match `width * height`.
    pub fn analyze(
        &self,
        pixels: &[Rgb8],
        width: usize,
        height: usize,
    ) -> Result<Analysis, QuantifyError> {
        let hsv = HsvImage::from_rgb(pixels, width, height)?;
        let signal_mask = build_mask(&hsv, self.signal.ranges());
        let exclusion_mask = build_mask(&hsv, self.exclusion.ranges());
        Ok(Analysis::new(hsv, signal_mask, exclusion_mask))
    }

    /// Counts and ratio for one image.
    pub fn quantify(
        &self,
        pixels: &[Rgb8],
        width: usize,
        height: usize,
    ) -> Result<QuantificationResult, QuantifyError> {
        self.analyze(pixels, width, height)?.result()
    }
}

/// One-shot form of [`RegionQuantifier::quantify`].
pub fn quantify(
    pixels: &[Rgb8],
    width: usize,
    height: usize,
    signal: &[ColorRange],
    exclusion: &[ColorRange],
) -> Result<QuantificationResult, QuantifyError> {
    RegionQuantifier::new(
        Category::new("signal", signal.to_vec()),
        Category::new("exclusion", exclusion.to_vec()),
    )
    .quantify(pixels, width, height)
}
