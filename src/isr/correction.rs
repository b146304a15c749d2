use tracing::{debug, info, instrument};

use crate::common::error::{CcdError, Result};
use crate::image::{Exposure, Mask};

/// Subtracts the electronic bias estimated from each amplifier's horizontal
/// overscan region from that amplifier's full raw segment.
///
/// Expects an assembled, untrimmed exposure carrying a mosaic-frame
/// detector; the overscan estimate is the region mean.
#[instrument(skip(exposure))]
pub fn overscan_correction(exposure: &mut Exposure) -> Result<()> {
    let detector = exposure
        .detector()
        .cloned()
        .ok_or(CcdError::MissingDetector)?;

    for amp in &detector {
        let oscan_region = amp.raw_horizontal_overscan_bbox.shifted(amp.raw_xy_offset);
        let bias = exposure.image().region_mean(&oscan_region)? as f32;
        let raw_region = amp.raw_bbox.shifted(amp.raw_xy_offset);
        exposure
            .image_mut()
            .map_region(&raw_region, |_, _, v| v - bias)?;
        debug!(amp = %amp.name, bias, "Overscan subtracted");
    }
    info!(n_amps = detector.amps().len(), "Overscan correction complete");
    Ok(())
}

/// Subtracts a dark frame scaled by the exposure time ratio.
#[instrument(skip(exposure, dark))]
pub fn dark_correction(exposure: &mut Exposure, dark: &Exposure) -> Result<()> {
    if exposure.bbox() != dark.bbox() {
        return Err(CcdError::MismatchedDimensions {
            expected: exposure.bbox().to_string(),
            actual: dark.bbox().to_string(),
        });
    }
    let scale = exposure.calib.exptime / dark.calib.exptime;
    let region = *exposure.bbox();
    let min = region.min();
    exposure.image_mut().map_region(&region, |lx, ly, v| {
        v - dark.image().get(min.x + lx, min.y + ly) * scale as f32
    })?;
    info!(scale, "Dark correction complete");
    Ok(())
}

/// Divides by a flat field, flagging non-positive flat pixels BAD and
/// leaving their values untouched.
#[instrument(skip(exposure, flat))]
pub fn flat_correction(exposure: &mut Exposure, flat: &Exposure) -> Result<()> {
    if exposure.bbox() != flat.bbox() {
        return Err(CcdError::MismatchedDimensions {
            expected: exposure.bbox().to_string(),
            actual: flat.bbox().to_string(),
        });
    }
    let region = *exposure.bbox();
    let mut flagged = 0usize;
    for y in region.min().y..=region.max().y {
        for x in region.min().x..=region.max().x {
            let f = flat.image().get(x, y);
            if f > 0.0 {
                let v = exposure.image().get(x, y);
                exposure.image_mut().set(x, y, v / f);
            } else {
                exposure.mask_mut().or_pixel(x, y, Mask::BAD);
                flagged += 1;
            }
        }
    }
    info!(flagged, "Flat correction complete");
    Ok(())
}
