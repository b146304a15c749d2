//! Per-amplifier readout geometry
//!
//! Each amplifier owns a science bounding box in assembled detector
//! coordinates plus the raw readout layout: science data, prescan, extended
//! register, and horizontal/vertical overscan boxes inside one raw segment.

use crate::camera::detector::DetectorLayout;
use crate::camera::geom::{Box2I, Extent2I, Point2I};
use crate::common::error::{CcdError, Result};

/// Corner of the raw segment holding the first pixel read out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadoutCorner {
    LowerLeft,
    LowerRight,
    UpperLeft,
    UpperRight,
}

impl ReadoutCorner {
    /// Maps the mirror flags of an amplifier to its readout corner.
    ///
    /// The mapping is a fixed bijection: (x, y) flips of (true, true) read
    /// from the upper right, (true, false) lower right, (false, true) upper
    /// left, and (false, false) lower left.
    pub fn from_flips(flip_x: bool, flip_y: bool) -> Self {
        match (flip_x, flip_y) {
            (true, true) => ReadoutCorner::UpperRight,
            (true, false) => ReadoutCorner::LowerRight,
            (false, true) => ReadoutCorner::UpperLeft,
            (false, false) => ReadoutCorner::LowerLeft,
        }
    }
}

/// Polynomial response linearization, fixed to identity for fixtures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linearity {
    pub coeffs: [f64; 4],
}

impl Default for Linearity {
    fn default() -> Self {
        Self {
            coeffs: [0.0, 1.0, 0.0, 0.0],
        }
    }
}

impl Linearity {
    pub fn apply(&self, adu: f64) -> f64 {
        self.coeffs
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * adu + c)
    }
}

/// Descriptor for one readout channel of a detector.
#[derive(Debug, Clone)]
pub struct Amplifier {
    pub name: String,
    /// Science pixels in assembled detector coordinates.
    pub bbox: Box2I,
    pub gain: f64,
    pub read_noise: f64,
    pub saturation: f64,
    pub linearity: Linearity,
    pub readout_corner: ReadoutCorner,
    /// Full raw segment: hull of the five sub-region boxes below.
    pub raw_bbox: Box2I,
    pub raw_data_bbox: Box2I,
    pub raw_prescan_bbox: Box2I,
    pub raw_extended_bbox: Box2I,
    pub raw_horizontal_overscan_bbox: Box2I,
    pub raw_vertical_overscan_bbox: Box2I,
    /// Mirror flags still to be applied when mosaicking raw segments.
    pub raw_flip_x: bool,
    pub raw_flip_y: bool,
    /// Offset from raw segment coordinates to the mosaic frame.
    pub raw_xy_offset: Extent2I,
}

/// Builds the amplifier at grid position (`ix`, `iy`).
///
/// The five raw sub-region boxes are composed by fixed offsets from the
/// science pixel counts and prescan/overscan/extended widths in `layout`.
/// With `per_amp` set, raw boxes stay in segment-local coordinates and only
/// the mosaic offset is recorded. Otherwise the boxes are mirrored per the
/// flip flags and translated into the mosaic frame; the flags are then
/// cleared and the readout corner reflects assembled coordinates.
pub fn build_amp(
    layout: &DetectorLayout,
    mut flip_x: bool,
    mut flip_y: bool,
    ix: i32,
    iy: i32,
    per_amp: bool,
) -> Result<Amplifier> {
    let nx = layout.n_pix_x;
    let ny = layout.n_pix_y;
    let pre = layout.prescan_rows;
    let hosc = layout.h_overscan_cols;
    let vosc = layout.v_overscan_rows;
    let ext = layout.extended_cols;

    let origin = Point2I::new(0, 0);
    let mut bbox = Box2I::new(origin, Extent2I::new(nx, ny));

    let mut data_box = Box2I::new(origin, Extent2I::new(nx, ny));
    data_box.shift(Extent2I::new(ext, pre));

    let mut pre_box = Box2I::new(origin, Extent2I::new(nx, pre));
    pre_box.shift(Extent2I::new(ext, 0));

    let mut ext_box = Box2I::new(origin, Extent2I::new(ext, ny));
    ext_box.shift(Extent2I::new(0, pre));

    let mut h_oscan_box = Box2I::new(origin, Extent2I::new(hosc, ny));
    h_oscan_box.shift(Extent2I::new(ext + nx, pre));

    let mut v_oscan_box = Box2I::new(origin, Extent2I::new(nx, vosc));
    v_oscan_box.shift(Extent2I::new(ext, pre + ny));

    let mut all_box = Box2I::empty();
    for b in [&data_box, &pre_box, &ext_box, &h_oscan_box, &v_oscan_box] {
        all_box.include(b);
    }

    bbox.shift(Extent2I::new(ix * nx, iy * ny));
    let xtot = all_box.dimensions().x;
    let ytot = all_box.dimensions().y;
    let r_shift = Extent2I::new(ix * xtot, iy * ytot);

    let raw_xy_offset;
    if !per_amp {
        all_box.shift(r_shift);

        if flip_x {
            for b in [
                &mut data_box,
                &mut pre_box,
                &mut ext_box,
                &mut h_oscan_box,
                &mut v_oscan_box,
            ] {
                b.flip_lr(xtot);
            }
            flip_x = false;
        }
        if flip_y {
            for b in [
                &mut data_box,
                &mut pre_box,
                &mut ext_box,
                &mut h_oscan_box,
                &mut v_oscan_box,
            ] {
                b.flip_tb(ytot);
            }
            flip_y = false;
        }

        for b in [
            &mut data_box,
            &mut pre_box,
            &mut ext_box,
            &mut h_oscan_box,
            &mut v_oscan_box,
        ] {
            b.shift(r_shift);
        }
        raw_xy_offset = Extent2I::new(0, 0);
    } else {
        raw_xy_offset = r_shift;
    }

    let amp = Amplifier {
        name: format!("A:{},{}", ix, iy),
        bbox,
        gain: 1.0,
        read_noise: 1.0,
        saturation: 100_000.0,
        linearity: Linearity::default(),
        // The readout corner is in mosaic coordinates.
        readout_corner: ReadoutCorner::from_flips(flip_x, flip_y),
        raw_bbox: all_box,
        raw_data_bbox: data_box,
        raw_prescan_bbox: pre_box,
        raw_extended_bbox: ext_box,
        raw_horizontal_overscan_bbox: h_oscan_box,
        raw_vertical_overscan_bbox: v_oscan_box,
        raw_flip_x: flip_x,
        raw_flip_y: flip_y,
        raw_xy_offset,
    };
    amp.verify_raw_geometry()?;
    Ok(amp)
}

impl Amplifier {
    /// Sub-region boxes in a fixed order: data, prescan, extended,
    /// horizontal overscan, vertical overscan.
    pub fn raw_sub_boxes(&self) -> [&Box2I; 5] {
        [
            &self.raw_data_bbox,
            &self.raw_prescan_bbox,
            &self.raw_extended_bbox,
            &self.raw_horizontal_overscan_bbox,
            &self.raw_vertical_overscan_bbox,
        ]
    }

    /// Checks that the sub-region boxes are pairwise disjoint and that
    /// their hull is exactly the raw bounding box.
    pub fn verify_raw_geometry(&self) -> Result<()> {
        let boxes = self.raw_sub_boxes();
        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                if boxes[i].overlaps(boxes[j]) {
                    return Err(CcdError::AmpGeometry(format!(
                        "amp {}: sub-regions {} and {} overlap",
                        self.name, boxes[i], boxes[j]
                    )));
                }
            }
        }
        let mut hull = Box2I::empty();
        for b in boxes {
            hull.include(b);
        }
        if hull != self.raw_bbox {
            return Err(CcdError::AmpGeometry(format!(
                "amp {}: sub-region hull {} does not match raw bbox {}",
                self.name, hull, self.raw_bbox
            )));
        }
        Ok(())
    }
}
