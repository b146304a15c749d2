use tracing::debug;

use crate::camera::amplifier::{Amplifier, build_amp};
use crate::camera::geom::{Box2I, Extent2I, Point2I};
use crate::common::error::Result;

/// Grid and per-amplifier pixel layout of a synthetic detector.
///
/// The default is the canonical fixture configuration: a 3x2 amplifier grid
/// of 512x1024 science pixels each, 4 prescan rows, 10 horizontal overscan
/// columns, 15 vertical overscan rows, and a 1-pixel extended register.
#[derive(Debug, Clone)]
pub struct DetectorLayout {
    /// Number of amplifiers along x.
    pub n_amp_x: i32,
    /// Number of amplifiers along y.
    pub n_amp_y: i32,
    /// Science pixels per amplifier along the serial register.
    pub n_pix_x: i32,
    /// Science pixels per amplifier in the parallel direction.
    pub n_pix_y: i32,
    pub prescan_rows: i32,
    pub h_overscan_cols: i32,
    pub v_overscan_rows: i32,
    pub extended_cols: i32,
    pub name: String,
    pub serial: String,
}

impl Default for DetectorLayout {
    fn default() -> Self {
        Self {
            n_amp_x: 3,
            n_amp_y: 2,
            n_pix_x: 512,
            n_pix_y: 1024,
            prescan_rows: 4,
            h_overscan_cols: 10,
            v_overscan_rows: 15,
            extended_cols: 1,
            name: "TestDetector".to_string(),
            serial: "THX1138".to_string(),
        }
    }
}

impl DetectorLayout {
    pub fn builder() -> DetectorLayoutBuilder {
        DetectorLayoutBuilder::default()
    }

    /// Science pixel dimensions of the assembled, trimmed detector.
    pub fn science_dimensions(&self) -> Extent2I {
        Extent2I::new(self.n_amp_x * self.n_pix_x, self.n_amp_y * self.n_pix_y)
    }

    /// Dimensions of one raw amplifier segment, non-science pixels included.
    pub fn raw_amp_dimensions(&self) -> Extent2I {
        Extent2I::new(
            self.extended_cols + self.n_pix_x + self.h_overscan_cols,
            self.prescan_rows + self.n_pix_y + self.v_overscan_rows,
        )
    }

    /// Builds the detector descriptor for this layout.
    ///
    /// Flip orientation alternates checkerboard-style across the grid,
    /// starting unflipped at (0, 0), and the gain of the amplifier at
    /// (ix, iy) is `ix + iy*n_amp_x + 1`. With `per_amp` set the amplifier
    /// raw geometry stays in segment-local coordinates; otherwise it is
    /// mirrored and translated into a single mosaic frame.
    pub fn build_detector(&self, per_amp: bool) -> Result<Detector> {
        let mut amps = Vec::with_capacity((self.n_amp_x * self.n_amp_y) as usize);
        let mut flip_y = true;
        for iy in 0..self.n_amp_y {
            flip_y = !flip_y;
            let mut flip_x = true;
            for ix in 0..self.n_amp_x {
                flip_x = !flip_x;
                let mut amp = build_amp(self, flip_x, flip_y, ix, iy, per_amp)?;
                amp.gain = (ix + iy * self.n_amp_x + 1) as f64;
                amps.push(amp);
            }
        }
        debug!(
            name = %self.name,
            n_amps = amps.len(),
            per_amp,
            "Built detector"
        );

        let dims = self.science_dimensions();
        Ok(Detector {
            name: self.name.clone(),
            id: 0,
            serial: self.serial.clone(),
            bbox: Box2I::new(Point2I::new(0, 0), dims),
            pixel_size_mm: (10.0 / 1000.0, 10.0 / 1000.0),
            ref_pos: (dims.x as f64 * 0.5 - 0.5, dims.y as f64 * 0.5 - 0.5),
            offset_mm: (0.0, 0.0),
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            roll_deg: 0.0,
            amps,
        })
    }
}

/// Builder for DetectorLayout
#[derive(Default)]
pub struct DetectorLayoutBuilder {
    n_amps: Option<(i32, i32)>,
    n_pixels: Option<(i32, i32)>,
    prescan_rows: Option<i32>,
    h_overscan_cols: Option<i32>,
    v_overscan_rows: Option<i32>,
    extended_cols: Option<i32>,
    name: Option<String>,
    serial: Option<String>,
}

impl DetectorLayoutBuilder {
    pub fn amps(mut self, n_amp_x: i32, n_amp_y: i32) -> Self {
        self.n_amps = Some((n_amp_x, n_amp_y));
        self
    }

    pub fn amp_pixels(mut self, n_pix_x: i32, n_pix_y: i32) -> Self {
        self.n_pixels = Some((n_pix_x, n_pix_y));
        self
    }

    pub fn prescan_rows(mut self, rows: i32) -> Self {
        self.prescan_rows = Some(rows);
        self
    }

    pub fn h_overscan_cols(mut self, cols: i32) -> Self {
        self.h_overscan_cols = Some(cols);
        self
    }

    pub fn v_overscan_rows(mut self, rows: i32) -> Self {
        self.v_overscan_rows = Some(rows);
        self
    }

    pub fn extended_cols(mut self, cols: i32) -> Self {
        self.extended_cols = Some(cols);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn build(self) -> DetectorLayout {
        let default = DetectorLayout::default();
        let (n_amp_x, n_amp_y) = self.n_amps.unwrap_or((default.n_amp_x, default.n_amp_y));
        let (n_pix_x, n_pix_y) = self.n_pixels.unwrap_or((default.n_pix_x, default.n_pix_y));
        DetectorLayout {
            n_amp_x,
            n_amp_y,
            n_pix_x,
            n_pix_y,
            prescan_rows: self.prescan_rows.unwrap_or(default.prescan_rows),
            h_overscan_cols: self.h_overscan_cols.unwrap_or(default.h_overscan_cols),
            v_overscan_rows: self.v_overscan_rows.unwrap_or(default.v_overscan_rows),
            extended_cols: self.extended_cols.unwrap_or(default.extended_cols),
            name: self.name.unwrap_or(default.name),
            serial: self.serial.unwrap_or(default.serial),
        }
    }
}

/// A named collection of amplifiers with its mounting configuration.
#[derive(Debug, Clone)]
pub struct Detector {
    pub name: String,
    pub id: u32,
    pub serial: String,
    /// Assembled science pixels.
    pub bbox: Box2I,
    pub pixel_size_mm: (f64, f64),
    /// Reference position, at the center of the science array.
    pub ref_pos: (f64, f64),
    pub offset_mm: (f64, f64),
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
    amps: Vec<Amplifier>,
}

impl Detector {
    pub fn amps(&self) -> &[Amplifier] {
        &self.amps
    }

    pub fn amp(&self, name: &str) -> Option<&Amplifier> {
        self.amps.iter().find(|a| a.name == name)
    }
}

impl<'a> IntoIterator for &'a Detector {
    type Item = &'a Amplifier;
    type IntoIter = std::slice::Iter<'a, Amplifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.amps.iter()
    }
}
