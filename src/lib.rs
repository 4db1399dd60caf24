//! stainquant - picrosirius red stain quantification
//!
//! Counts stain and slide-background pixels in histology images with HSV
//! thresholds and reports the stained share of the tissue area.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
