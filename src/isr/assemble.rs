use std::collections::HashMap;

use tracing::{info, instrument};

use crate::camera::Box2I;
use crate::common::error::{CcdError, Result};
use crate::image::{Exposure, MaskedImage};

/// Configuration for CCD assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleConfig {
    /// Trim non-science pixels (prescan, overscan, extended register) from
    /// the output mosaic.
    pub do_trim: bool,
}

/// Mosaics per-amplifier exposures into a single CCD exposure.
///
/// Input exposures carry a detector built in per-amplifier mode: each raw
/// segment is in its own local frame with flip flags and a mosaic offset
/// still to apply. Assembly mirrors each segment per its flags and pastes it
/// at the offset (untrimmed) or pastes the mirrored science region at the
/// amplifier's assembled bounding box (trimmed).
pub struct AssembleCcd {
    config: AssembleConfig,
}

impl AssembleCcd {
    pub fn new(config: AssembleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssembleConfig {
        &self.config
    }

    #[instrument(skip(self, inputs), fields(n_inputs = inputs.len(), do_trim = self.config.do_trim))]
    pub fn assemble(&self, inputs: &HashMap<String, Exposure>) -> Result<Exposure> {
        let reference = inputs.values().next().ok_or(CcdError::EmptyAssemblyInput)?;
        let detector = reference
            .detector()
            .cloned()
            .ok_or(CcdError::MissingDetector)?;

        let out_bbox = if self.config.do_trim {
            detector.bbox
        } else {
            let mut hull = Box2I::empty();
            for amp in &detector {
                hull.include(&amp.raw_bbox.shifted(amp.raw_xy_offset));
            }
            hull
        };

        let mut out = MaskedImage::new(out_bbox);
        for amp in &detector {
            let amp_exp = inputs
                .get(&amp.name)
                .ok_or_else(|| CcdError::MissingAmp(amp.name.clone()))?;
            let (src_region, dest_min) = if self.config.do_trim {
                (amp.raw_data_bbox, amp.bbox.min())
            } else {
                (amp.raw_bbox, amp.raw_bbox.shifted(amp.raw_xy_offset).min())
            };
            let src = amp_exp.masked_image();
            out.image.blit_region(
                dest_min,
                &src.image,
                &src_region,
                amp.raw_flip_x,
                amp.raw_flip_y,
            )?;
            out.mask.blit_region(
                dest_min,
                &src.mask,
                &src_region,
                amp.raw_flip_x,
                amp.raw_flip_y,
            )?;
            out.variance.blit_region(
                dest_min,
                &src.variance,
                &src_region,
                amp.raw_flip_x,
                amp.raw_flip_y,
            )?;
        }

        let mut exposure = Exposure::new(out);
        exposure.calib = reference.calib;
        if let Some(wcs) = reference.wcs() {
            exposure.set_wcs(*wcs);
        }
        info!(
            width = out_bbox.width(),
            height = out_bbox.height(),
            "Assembled CCD"
        );
        Ok(exposure)
    }
}

/// Trims an assembled, untrimmed exposure down to its science pixels.
///
/// The exposure must carry a mosaic-frame detector; each amplifier's science
/// data region is copied to its assembled bounding box. No mirroring is
/// involved, assembly already oriented the segments.
#[instrument(skip(exposure))]
pub fn trim_exposure(exposure: &Exposure) -> Result<Exposure> {
    let detector = exposure
        .detector()
        .cloned()
        .ok_or(CcdError::MissingDetector)?;

    let mut out = MaskedImage::new(detector.bbox);
    let src = exposure.masked_image();
    for amp in &detector {
        let dest_min = amp.bbox.min();
        out.image
            .blit_region(dest_min, &src.image, &amp.raw_data_bbox, false, false)?;
        out.mask
            .blit_region(dest_min, &src.mask, &amp.raw_data_bbox, false, false)?;
        out.variance
            .blit_region(dest_min, &src.variance, &amp.raw_data_bbox, false, false)?;
    }

    let mut trimmed = Exposure::new(out);
    trimmed.calib = exposure.calib;
    if let Some(wcs) = exposure.wcs() {
        trimmed.set_wcs(*wcs);
    }
    trimmed.set_detector(detector);
    Ok(trimmed)
}
