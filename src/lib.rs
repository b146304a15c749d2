//! Synthetic CCD detectors and exposures for exercising image-reduction
//! code: amplifier/detector geometry builders, raw/dark/flat fixture
//! synthesizers, CCD assembly, and basic instrument signature removal.

pub mod camera;
pub mod common;
pub mod fixtures;
pub mod image;
pub mod isr;
pub mod logger;

pub use common::{CcdError, Result};
