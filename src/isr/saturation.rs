use tracing::{info, instrument};

use crate::camera::{Amplifier, Box2I, Detector};
use crate::common::error::{CcdError, Result};
use crate::image::{Exposure, Mask};

/// Configuration for saturation correction.
#[derive(Debug, Clone, Copy)]
pub struct SaturationConfig {
    /// Replace flagged pixels by row-wise linear interpolation.
    pub do_interpolate: bool,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            do_interpolate: true,
        }
    }
}

/// Counts of pixels touched by a saturation correction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaturationStats {
    pub flagged: usize,
    pub interpolated: usize,
}

/// The pixel region an amplifier covers in `exposure`'s frame: the science
/// box when the exposure is trimmed to the detector, the raw segment
/// otherwise.
fn amp_region(exposure: &Exposure, detector: &Detector, amp: &Amplifier) -> Box2I {
    if *exposure.bbox() == detector.bbox {
        amp.bbox
    } else {
        amp.raw_bbox.shifted(amp.raw_xy_offset)
    }
}

/// Flags pixels at or above each amplifier's saturation level with SAT and
/// optionally replaces them by interpolating along rows (flagged INTRP).
///
/// The exposure must carry a detector; the per-amplifier saturation levels
/// come from it.
#[instrument(skip(exposure, config))]
pub fn saturation_correction(
    exposure: &mut Exposure,
    config: &SaturationConfig,
) -> Result<SaturationStats> {
    let detector = exposure
        .detector()
        .cloned()
        .ok_or(CcdError::MissingDetector)?;

    let mut stats = SaturationStats::default();
    for amp in &detector {
        let region = amp_region(exposure, &detector, amp);
        let level = amp.saturation as f32;

        for y in region.min().y..=region.max().y {
            for x in region.min().x..=region.max().x {
                if exposure.image().get(x, y) >= level {
                    exposure.mask_mut().or_pixel(x, y, Mask::SAT);
                    stats.flagged += 1;
                }
            }
        }

        if config.do_interpolate {
            stats.interpolated += interpolate_rows(exposure, &region);
        }
    }

    info!(
        flagged = stats.flagged,
        interpolated = stats.interpolated,
        "Saturation correction complete"
    );
    Ok(stats)
}

/// Replaces SAT runs in each row of `region` with a linear ramp between the
/// nearest unflagged neighbors. A run touching one edge holds the value of
/// the neighbor on its open side; a fully saturated row is left in place.
fn interpolate_rows(exposure: &mut Exposure, region: &Box2I) -> usize {
    let mut interpolated = 0;
    for y in region.min().y..=region.max().y {
        let mut x = region.min().x;
        while x <= region.max().x {
            if exposure.mask().get(x, y) & Mask::SAT == 0 {
                x += 1;
                continue;
            }
            let run_start = x;
            while x <= region.max().x && exposure.mask().get(x, y) & Mask::SAT != 0 {
                x += 1;
            }
            let run_end = x - 1;

            let left = (run_start > region.min().x)
                .then(|| exposure.image().get(run_start - 1, y) as f64);
            let right = (run_end < region.max().x).then(|| exposure.image().get(x, y) as f64);
            let (v0, v1) = match (left, right) {
                (Some(l), Some(r)) => (l, r),
                (Some(l), None) => (l, l),
                (None, Some(r)) => (r, r),
                (None, None) => continue,
            };

            let span = (run_end - run_start + 2) as f64;
            for (i, px) in (run_start..=run_end).enumerate() {
                let t = (i + 1) as f64 / span;
                let value = v0 + (v1 - v0) * t;
                exposure.image_mut().set(px, y, value as f32);
                exposure.mask_mut().or_pixel(px, y, Mask::INTRP);
                interpolated += 1;
            }
        }
    }
    interpolated
}
