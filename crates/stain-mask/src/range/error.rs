//! Error type for range validation

use std::fmt;

use super::color_range::Channel;

/// Error type for range validation.
///
/// Returned when a range definition cannot describe a non-empty box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Lower bound exceeds upper bound on one channel
    InvertedBounds {
        /// Offending channel
        channel: Channel,
        /// Lower bound given for that channel
        lower: u8,
        /// Upper bound given for that channel
        upper: u8,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::InvertedBounds {
                channel,
                lower,
                upper,
            } => write!(
                f,
                "lower bound {} exceeds upper bound {} on channel {}",
                lower, upper, channel
            ),
        }
    }
}

impl std::error::Error for RangeError {}
