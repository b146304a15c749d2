//! Detector geometry module
//!
//! This module describes synthetic CCD detectors: integer box arithmetic,
//! per-amplifier readout geometry, and whole-detector construction.

pub mod geom;
mod amplifier;
mod detector;

mod tests;

pub use amplifier::{Amplifier, Linearity, ReadoutCorner, build_amp};
pub use detector::{Detector, DetectorLayout, DetectorLayoutBuilder};
pub use geom::{Box2I, Extent2I, Point2I};
