//! Public API for the stain-mask crate.
//!
//! This module provides the high-level API: the [`RegionQuantifier`]
//! builder, its result types and the [`QuantifyError`] unified error type.

mod error;
mod quantifier;
mod result;

pub use error::QuantifyError;
pub use quantifier::{quantify, Category, RegionQuantifier};
pub use result::{Analysis, PixelCounts, QuantificationResult};
