//! Image container module
//!
//! Pixel, variance, and mask planes plus the exposure wrapper consumed by
//! assembly and correction routines, and TIFF output for finished exposures.

pub mod types;
mod tiff_writer;
mod wcs;
mod writer;


pub use tiff_writer::TiffExposureWriter;
pub use types::{Calib, Exposure, ImageF, Mask, MaskedImage};
pub use wcs::Wcs;
pub use writer::{ExposureWriter, TiffCompression, WriteConfig, WriteConfigBuilder};
