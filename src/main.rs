use anyhow::Context;
use ccd_testkit::fixtures::{DataProduct, DatasetType, FakeDataRef};
use ccd_testkit::isr::{
    SaturationConfig, dark_correction, flat_correction, overscan_correction,
    saturation_correction, trim_exposure,
};
use ccd_testkit::logger;

use tracing::{error, info};

fn get_exposure(data_ref: &FakeDataRef, dataset: DatasetType) -> anyhow::Result<ccd_testkit::image::Exposure> {
    data_ref
        .get(dataset)?
        .into_exposure()
        .with_context(|| format!("{:?} did not yield an exposure", dataset))
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting ISR demo run...");

    let data_ref = FakeDataRef::default();
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "isr_demo_output".to_string());

    let mut raw = get_exposure(&data_ref, DatasetType::Raw)?;
    info!(
        width = raw.bbox().width(),
        height = raw.bbox().height(),
        exptime = raw.calib.exptime,
        "Synthesized raw mosaic"
    );

    let stats = saturation_correction(&mut raw, &SaturationConfig::default())?;
    info!(flagged = stats.flagged, "Saturation pass done");

    overscan_correction(&mut raw)?;
    let mut reduced = trim_exposure(&raw)?;

    let dark = get_exposure(&data_ref, DatasetType::Dark)?;
    dark_correction(&mut reduced, &dark)?;

    let flat = get_exposure(&data_ref, DatasetType::Flat)?;
    flat_correction(&mut reduced, &flat)?;

    let defects = data_ref.get(DatasetType::Defects)?;
    if let DataProduct::Defects(defects) = defects {
        info!(n_defects = defects.len(), "Defect list loaded");
    }

    match data_ref.put(&reduced, &output) {
        Ok(path) => info!(path = %path.display(), "Reduction successful!"),
        Err(e) => error!("Failed to write output: {}", e),
    }

    Ok(())
}
