use thiserror::Error;

#[derive(Error, Debug)]
pub enum CcdError {
    #[error("Invalid amplifier geometry: {0}")]
    AmpGeometry(String),

    #[error("Region {region} is not contained in image bounds {bounds}")]
    RegionOutOfBounds { region: String, bounds: String },

    #[error("No amplifier exposure supplied for '{0}'")]
    MissingAmp(String),

    #[error("Assembly input is empty")]
    EmptyAssemblyInput,

    #[error("Exposure has no detector attached")]
    MissingDetector,

    #[error("Mismatched image dimensions: {expected} expected, got {actual}")]
    MismatchedDimensions { expected: String, actual: String },

    #[error("Failed to encode output image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CcdError>;
