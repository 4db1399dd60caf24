//! Quantification outputs.

use super::error::QuantifyError;
use crate::mask::{HsvImage, Mask};

/// Raw pixel counts for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelCounts {
    /// Pixels inside the signal category
    pub signal: usize,
    /// Pixels inside the exclusion category
    pub exclusion: usize,
    /// `width * height`
    pub total: usize,
}

impl PixelCounts {
    /// Pixels left after removing the exclusion category.
    #[inline]
    pub fn tissue(&self) -> usize {
        self.total.saturating_sub(self.exclusion)
    }

    /// `signal / (total - exclusion)`.
    ///
    /// Returns [`QuantifyError::DivisionUndefined`] when nothing is left to
    /// divide by.
    pub fn ratio(&self) -> Result<f64, QuantifyError> {
        let tissue = self.tissue();
        if tissue == 0 {
            return Err(QuantifyError::DivisionUndefined {
                total: self.total,
                exclusion: self.exclusion,
            });
        }
        Ok(self.signal as f64 / tissue as f64)
    }
}

/// Counts together with the derived ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantificationResult {
    pub signal: usize,
    pub exclusion: usize,
    pub total: usize,
    /// `signal / (total - exclusion)`, always finite
    pub ratio: f64,
}

impl TryFrom<PixelCounts> for QuantificationResult {
    type Error = QuantifyError;

    fn try_from(counts: PixelCounts) -> Result<Self, Self::Error> {
        let ratio = counts.ratio()?;
        Ok(Self {
            signal: counts.signal,
            exclusion: counts.exclusion,
            total: counts.total,
            ratio,
        })
    }
}

/// Everything one analysis pass derives from an image.
///
/// Kept separate from [`QuantificationResult`] so callers can still inspect
/// or export the masks of an image whose ratio is undefined.
#[derive(Debug, Clone)]
pub struct Analysis {
    hsv: HsvImage,
    signal_mask: Mask,
    exclusion_mask: Mask,
}

impl Analysis {
    pub(crate) fn new(hsv: HsvImage, signal_mask: Mask, exclusion_mask: Mask) -> Self {
        Self {
            hsv,
            signal_mask,
            exclusion_mask,
        }
    }

    #[inline]
    pub fn hsv(&self) -> &HsvImage {
        &self.hsv
    }

    #[inline]
    pub fn signal_mask(&self) -> &Mask {
        &self.signal_mask
    }

    #[inline]
    pub fn exclusion_mask(&self) -> &Mask {
        &self.exclusion_mask
    }

    pub fn counts(&self) -> PixelCounts {
        PixelCounts {
            signal: self.signal_mask.included_count(),
            exclusion: self.exclusion_mask.included_count(),
            total: self.hsv.width() * self.hsv.height(),
        }
    }

    /// Counts and ratio, or [`QuantifyError::DivisionUndefined`].
    pub fn result(&self) -> Result<QuantificationResult, QuantifyError> {
        QuantificationResult::try_from(self.counts())
    }
}
