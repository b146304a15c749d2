use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::camera::{Amplifier, Box2I, Detector, DetectorLayout, Extent2I};
use crate::common::error::Result;
use crate::image::{Exposure, ImageF, Mask, MaskedImage, Wcs};
use crate::isr::{AssembleCcd, AssembleConfig};

/// Side of the square mark placed at the first pixel read.
const READ_MARK_SIZE: i32 = 10;

/// Pedestal value of the science region in synthetic raws, in electrons.
const RAW_PEDESTAL: f64 = 5000.0;

/// A WCS to put in fixture exposures: ICRS (45, 45) degrees at pixel
/// (0, 0), one degree per pixel, no rotation.
pub fn make_fake_wcs() -> Wcs {
    Wcs::new((45.0, 45.0), (0.0, 0.0), [[1.0, 0.0], [0.0, 1.0]])
}

/// An image of one raw amplifier segment, science pixels set to the gain
/// value and a zeroed square marking the location of the first pixel read.
pub fn make_fake_amp(amp: &Amplifier) -> Result<ImageF> {
    let mut im = ImageF::from_dimensions(amp.raw_bbox.dimensions());
    im.fill(amp.gain as f32);
    // mark no larger than the science region itself
    let data_dims = amp.raw_data_bbox.dimensions();
    let mark = Box2I::new(
        amp.raw_data_bbox.min(),
        Extent2I::new(
            READ_MARK_SIZE.min(data_dims.x),
            READ_MARK_SIZE.min(data_dims.y),
        ),
    );
    im.fill_region(&mark, 0.0)?;
    Ok(im)
}

/// Per-amplifier exposures for assembly, keyed by amplifier name.
///
/// Each exposure carries the detector, the fixture WCS, a zeroed mask, and
/// a variance plane copied from the image.
pub fn make_amp_input(detector: &Detector) -> Result<HashMap<String, Exposure>> {
    let wcs = make_fake_wcs();
    let mut input = HashMap::new();
    for amp in detector {
        let im = make_fake_amp(amp)?;
        let variance = im.clone();
        let mask = Mask::new(*im.bbox());
        let mut exposure = Exposure::new(MaskedImage::from_planes(im, mask, variance)?);
        exposure.set_detector(detector.clone());
        exposure.set_wcs(wcs);
        input.insert(amp.name.clone(), exposure);
    }
    Ok(input)
}

/// One mosaicked exposure assembled from per-amplifier fixture input, with
/// the mosaic-frame detector attached. With `do_trim` the mosaic holds only
/// science pixels; otherwise prescan and overscan are preserved.
#[instrument(skip(layout))]
pub fn make_assembled_input(layout: &DetectorLayout, do_trim: bool) -> Result<Exposure> {
    let per_amp_detector = layout.build_detector(true)?;
    let input = make_amp_input(&per_amp_detector)?;
    let task = AssembleCcd::new(AssembleConfig { do_trim });
    let mut exposure = task.assemble(&input)?;
    exposure.set_detector(layout.build_detector(false)?);
    Ok(exposure)
}

/// The fractional row gradient factor at local row `ly` of `n_rows`,
/// running from 1 at the bottom row to `1 - gradient` at the top.
fn row_gradient(gradient: f64, ly: i32, n_rows: i32) -> f64 {
    if n_rows > 1 {
        1.0 - gradient * ly as f64 / (n_rows - 1) as f64
    } else {
        1.0
    }
}

/// A raw exposure for ISR input: an untrimmed mosaic whose science regions
/// hold the pedestal modulated by the row gradient, plus accumulated dark
/// current, divided by the amplifier gain, on an overscan pedestal. The
/// horizontal overscan regions hold the overscan value alone.
///
/// `dark_rate` is in e-/sec, `oscan` in DN, `exptime` in seconds.
#[instrument(skip(layout))]
pub fn make_raw(
    layout: &DetectorLayout,
    dark_rate: f64,
    oscan: f64,
    gradient: f64,
    exptime: f64,
) -> Result<Exposure> {
    let mut exposure = make_assembled_input(layout, false)?;
    exposure.calib.exptime = exptime;
    let detector = layout.build_detector(false)?;
    for amp in &detector {
        let region = amp.raw_data_bbox;
        let n_rows = region.height();
        let gain = amp.gain;
        exposure.image_mut().map_region(&region, |_, ly, _| {
            let signal = RAW_PEDESTAL * row_gradient(gradient, ly, n_rows) + dark_rate * exptime;
            (signal / gain + oscan) as f32
        })?;
        exposure
            .image_mut()
            .fill_region(&amp.raw_horizontal_overscan_bbox, oscan as f32)?;
        debug!(amp = %amp.name, gain, "Filled raw amp");
    }
    Ok(exposure)
}

/// A dark exposure in DN: a trimmed mosaic holding the accumulated dark
/// current divided by the gain, constant per amplifier.
#[instrument(skip(layout))]
pub fn make_dark(layout: &DetectorLayout, dark_rate: f64, exptime: f64) -> Result<Exposure> {
    let mut exposure = make_assembled_input(layout, true)?;
    exposure.calib.exptime = exptime;
    let detector = layout.build_detector(false)?;
    for amp in &detector {
        exposure
            .image_mut()
            .fill_region(&amp.bbox, (dark_rate * exptime / amp.gain) as f32)?;
    }
    Ok(exposure)
}

/// A flat exposure including gain variation: a trimmed mosaic holding the
/// row gradient divided by the gain, per amplifier.
#[instrument(skip(layout))]
pub fn make_flat(layout: &DetectorLayout, gradient: f64) -> Result<Exposure> {
    let mut exposure = make_assembled_input(layout, true)?;
    let detector = layout.build_detector(false)?;
    for amp in &detector {
        let n_rows = amp.bbox.height();
        let gain = amp.gain;
        exposure.image_mut().map_region(&amp.bbox, |_, ly, _| {
            (row_gradient(gradient, ly, n_rows) / gain) as f32
        })?;
    }
    Ok(exposure)
}
