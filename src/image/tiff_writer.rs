use std::io::Write;

use tracing::debug;

use crate::common::error::{CcdError, Result};
use crate::image::types::Exposure;
use crate::image::writer::{ExposureWriter, TiffCompression, WriteConfig};

/// Writes the image plane of an exposure as a 32-bit float grayscale TIFF.
pub struct TiffExposureWriter;

impl ExposureWriter for TiffExposureWriter {
    fn write_exposure(
        &self,
        exposure: &Exposure,
        output: &mut dyn Write,
        config: &WriteConfig,
    ) -> Result<()> {
        let dims = exposure.image().dimensions();
        debug!("Encoding TIFF image: {}x{}", dims.x, dims.y);

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Fast,
            ),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Balanced,
            ),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Best,
            ),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| CcdError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<tiff::encoder::colortype::Gray32Float>(
                dims.x as u32,
                dims.y as u32,
                exposure.image().pixels(),
            )
            .map_err(|e| CcdError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
