use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::camera::{Box2I, DetectorLayout};
use crate::common::error::{CcdError, Result};
use crate::fixtures::synth::{make_dark, make_flat, make_raw};
use crate::image::{Exposure, ExposureWriter, TiffExposureWriter, WriteConfig};

/// Data products the mock data reference can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetType {
    Raw,
    Dark,
    Flat,
    Defects,
}

/// What a `get` call returned: an exposure or a defect list.
#[derive(Debug, Clone)]
pub enum DataProduct {
    Exposure(Exposure),
    Defects(Vec<Box2I>),
}

impl DataProduct {
    pub fn into_exposure(self) -> Option<Exposure> {
        match self {
            DataProduct::Exposure(exposure) => Some(exposure),
            DataProduct::Defects(_) => None,
        }
    }
}

/// A mock data reference for running ISR example code without a real data
/// repository. `get` synthesizes the requested product from fixed fixture
/// parameters; `put` writes an exposure to a `.tiff` file.
///
/// Extend the parameter set here to mimic other getters (fringe, e.g.) if
/// needed.
#[derive(Debug, Clone)]
pub struct FakeDataRef {
    /// Dark current in e-/sec.
    pub dark_rate: f64,
    /// Overscan pedestal in DN.
    pub oscan: f64,
    /// Fractional flat gradient.
    pub gradient: f64,
    /// Exposure time of the raw frame in seconds.
    pub exptime: f64,
    /// Exposure time of the dark frame in seconds.
    pub dark_exptime: f64,
    pub data_id: String,
    pub layout: DetectorLayout,
}

impl Default for FakeDataRef {
    fn default() -> Self {
        Self {
            dark_rate: 2.0,
            oscan: 1000.0,
            gradient: 0.10,
            exptime: 15.0,
            dark_exptime: 40.0,
            data_id: "My Fake Data".to_string(),
            layout: DetectorLayout::default(),
        }
    }
}

impl FakeDataRef {
    pub fn get(&self, dataset: DatasetType) -> Result<DataProduct> {
        match dataset {
            DatasetType::Raw => make_raw(
                &self.layout,
                self.dark_rate,
                self.oscan,
                self.gradient,
                self.exptime,
            )
            .map(DataProduct::Exposure),
            DatasetType::Dark => {
                make_dark(&self.layout, self.dark_rate, self.dark_exptime)
                    .map(DataProduct::Exposure)
            }
            DatasetType::Flat => {
                make_flat(&self.layout, self.gradient).map(DataProduct::Exposure)
            }
            DatasetType::Defects => Ok(DataProduct::Defects(Vec::new())),
        }
    }

    /// Writes `exposure` next to `path`, with the extension forced to
    /// `.tiff`. Returns the path written.
    pub fn put(&self, exposure: &Exposure, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref().with_extension("tiff");
        let mut file = File::create(&path)
            .map_err(|e| CcdError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        TiffExposureWriter.write_exposure(exposure, &mut file, &WriteConfig::default())?;
        info!(path = %path.display(), data_id = %self.data_id, "Wrote exposure");
        Ok(path)
    }
}
