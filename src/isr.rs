//! Instrument signature removal module
//!
//! CCD assembly from per-amplifier exposures plus the correction routines
//! that consume assembled raws and calibration frames.

mod assemble;
mod correction;
mod saturation;


pub use assemble::{AssembleCcd, AssembleConfig, trim_exposure};
pub use correction::{dark_correction, flat_correction, overscan_correction};
pub use saturation::{SaturationConfig, SaturationStats, saturation_correction};
