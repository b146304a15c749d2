//! Test fixture module
//!
//! Synthetic exposures (raw, dark, flat, per-amplifier assembly input) built
//! against a synthetic detector, plus a mock data reference standing in for
//! a real data-access layer.

mod data_ref;
mod synth;

mod tests;

pub use data_ref::{DataProduct, DatasetType, FakeDataRef};
pub use synth::{
    make_amp_input, make_assembled_input, make_dark, make_fake_amp, make_fake_wcs, make_flat,
    make_raw,
};
