//! Pixel, mask, and exposure containers
//!
//! Planes carry their bounding box, so sub-regions are always addressed in
//! parent (detector or mosaic) coordinates.

use crate::camera::{Box2I, Detector, Extent2I, Point2I};
use crate::common::error::{CcdError, Result};
use crate::image::wcs::Wcs;

/// A single-channel f32 image plane.
#[derive(Debug, Clone)]
pub struct ImageF {
    bbox: Box2I,
    data: Vec<f32>,
}

impl ImageF {
    /// A zero-filled plane covering `bbox`.
    pub fn new(bbox: Box2I) -> Self {
        Self {
            bbox,
            data: vec![0.0; bbox.area() as usize],
        }
    }

    /// A zero-filled plane of the given size with its origin at (0, 0).
    pub fn from_dimensions(dims: Extent2I) -> Self {
        Self::new(Box2I::new(Point2I::new(0, 0), dims))
    }

    pub fn bbox(&self) -> &Box2I {
        &self.bbox
    }

    pub fn dimensions(&self) -> Extent2I {
        self.bbox.dimensions()
    }

    /// Row-major pixel data, starting at the bounding box minimum.
    pub fn pixels(&self) -> &[f32] {
        &self.data
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bbox.contains_point(Point2I::new(x, y)));
        let local_x = (x - self.bbox.min().x) as usize;
        let local_y = (y - self.bbox.min().y) as usize;
        local_y * self.bbox.width() as usize + local_x
    }

    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.data[self.offset(x, y)]
    }

    pub fn set(&mut self, x: i32, y: i32, value: f32) {
        let i = self.offset(x, y);
        self.data[i] = value;
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    fn check_region(&self, region: &Box2I) -> Result<()> {
        if !self.bbox.contains(region) {
            return Err(CcdError::RegionOutOfBounds {
                region: region.to_string(),
                bounds: self.bbox.to_string(),
            });
        }
        Ok(())
    }

    pub fn fill_region(&mut self, region: &Box2I, value: f32) -> Result<()> {
        self.check_region(region)?;
        self.map_region(region, |_, _, _| value)
    }

    /// Rewrites every pixel of `region` from its region-local coordinates
    /// and current value.
    pub fn map_region(
        &mut self,
        region: &Box2I,
        mut f: impl FnMut(i32, i32, f32) -> f32,
    ) -> Result<()> {
        self.check_region(region)?;
        for ly in 0..region.height() {
            for lx in 0..region.width() {
                let x = region.min().x + lx;
                let y = region.min().y + ly;
                let i = self.offset(x, y);
                self.data[i] = f(lx, ly, self.data[i]);
            }
        }
        Ok(())
    }

    /// Mean over a region; zero for an empty region.
    pub fn region_mean(&self, region: &Box2I) -> Result<f64> {
        self.check_region(region)?;
        if region.is_empty() {
            return Ok(0.0);
        }
        let mut sum = 0.0f64;
        for ly in 0..region.height() {
            for lx in 0..region.width() {
                sum += self.get(region.min().x + lx, region.min().y + ly) as f64;
            }
        }
        Ok(sum / region.area() as f64)
    }

    /// Copies `src_region` of `src` into this plane with its minimum at
    /// `dest_min`, optionally mirroring the region about its own center
    /// along either axis.
    pub fn blit_region(
        &mut self,
        dest_min: Point2I,
        src: &ImageF,
        src_region: &Box2I,
        flip_x: bool,
        flip_y: bool,
    ) -> Result<()> {
        src.check_region(src_region)?;
        let dest_region = Box2I::new(dest_min, src_region.dimensions());
        self.check_region(&dest_region)?;
        let w = src_region.width();
        let h = src_region.height();
        for ly in 0..h {
            for lx in 0..w {
                let sx = src_region.min().x + lx;
                let sy = src_region.min().y + ly;
                let dx = dest_min.x + if flip_x { w - 1 - lx } else { lx };
                let dy = dest_min.y + if flip_y { h - 1 - ly } else { ly };
                let i = self.offset(dx, dy);
                self.data[i] = src.get(sx, sy);
            }
        }
        Ok(())
    }
}

/// A bit-plane mask aligned with an image plane.
#[derive(Debug, Clone)]
pub struct Mask {
    bbox: Box2I,
    data: Vec<u16>,
}

impl Mask {
    /// Static bad pixel, from a defect list.
    pub const BAD: u16 = 1 << 0;
    /// Pixel at or above the amplifier saturation level.
    pub const SAT: u16 = 1 << 1;
    /// Pixel value replaced by interpolation.
    pub const INTRP: u16 = 1 << 2;

    pub fn new(bbox: Box2I) -> Self {
        Self {
            bbox,
            data: vec![0; bbox.area() as usize],
        }
    }

    pub fn from_dimensions(dims: Extent2I) -> Self {
        Self::new(Box2I::new(Point2I::new(0, 0), dims))
    }

    pub fn bbox(&self) -> &Box2I {
        &self.bbox
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bbox.contains_point(Point2I::new(x, y)));
        let local_x = (x - self.bbox.min().x) as usize;
        let local_y = (y - self.bbox.min().y) as usize;
        local_y * self.bbox.width() as usize + local_x
    }

    pub fn get(&self, x: i32, y: i32) -> u16 {
        self.data[self.offset(x, y)]
    }

    pub fn or_pixel(&mut self, x: i32, y: i32, bits: u16) {
        let i = self.offset(x, y);
        self.data[i] |= bits;
    }

    pub fn or_region(&mut self, region: &Box2I, bits: u16) -> Result<()> {
        if !self.bbox.contains(region) {
            return Err(CcdError::RegionOutOfBounds {
                region: region.to_string(),
                bounds: self.bbox.to_string(),
            });
        }
        for ly in 0..region.height() {
            for lx in 0..region.width() {
                self.or_pixel(region.min().x + lx, region.min().y + ly, bits);
            }
        }
        Ok(())
    }

    pub fn blit_region(
        &mut self,
        dest_min: Point2I,
        src: &Mask,
        src_region: &Box2I,
        flip_x: bool,
        flip_y: bool,
    ) -> Result<()> {
        if !src.bbox.contains(src_region) {
            return Err(CcdError::RegionOutOfBounds {
                region: src_region.to_string(),
                bounds: src.bbox.to_string(),
            });
        }
        let dest_region = Box2I::new(dest_min, src_region.dimensions());
        if !self.bbox.contains(&dest_region) {
            return Err(CcdError::RegionOutOfBounds {
                region: dest_region.to_string(),
                bounds: self.bbox.to_string(),
            });
        }
        let w = src_region.width();
        let h = src_region.height();
        for ly in 0..h {
            for lx in 0..w {
                let sx = src_region.min().x + lx;
                let sy = src_region.min().y + ly;
                let dx = dest_min.x + if flip_x { w - 1 - lx } else { lx };
                let dy = dest_min.y + if flip_y { h - 1 - ly } else { ly };
                let i = self.offset(dx, dy);
                self.data[i] = src.get(sx, sy);
            }
        }
        Ok(())
    }
}

/// Image, mask, and variance planes sharing one bounding box.
#[derive(Debug, Clone)]
pub struct MaskedImage {
    pub image: ImageF,
    pub mask: Mask,
    pub variance: ImageF,
}

impl MaskedImage {
    pub fn new(bbox: Box2I) -> Self {
        Self {
            image: ImageF::new(bbox),
            mask: Mask::new(bbox),
            variance: ImageF::new(bbox),
        }
    }

    pub fn from_planes(image: ImageF, mask: Mask, variance: ImageF) -> Result<Self> {
        if image.bbox() != mask.bbox() || image.bbox() != variance.bbox() {
            return Err(CcdError::MismatchedDimensions {
                expected: image.bbox().to_string(),
                actual: format!("mask {}, variance {}", mask.bbox(), variance.bbox()),
            });
        }
        Ok(Self {
            image,
            mask,
            variance,
        })
    }

    pub fn bbox(&self) -> &Box2I {
        self.image.bbox()
    }
}

/// Observation calibration metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calib {
    /// Exposure time in seconds.
    pub exptime: f64,
}

/// A masked image with its world coordinates, detector, and calibration.
#[derive(Debug, Clone)]
pub struct Exposure {
    masked_image: MaskedImage,
    wcs: Option<Wcs>,
    detector: Option<Detector>,
    pub calib: Calib,
}

impl Exposure {
    pub fn new(masked_image: MaskedImage) -> Self {
        Self {
            masked_image,
            wcs: None,
            detector: None,
            calib: Calib::default(),
        }
    }

    pub fn bbox(&self) -> &Box2I {
        self.masked_image.bbox()
    }

    pub fn masked_image(&self) -> &MaskedImage {
        &self.masked_image
    }

    pub fn masked_image_mut(&mut self) -> &mut MaskedImage {
        &mut self.masked_image
    }

    pub fn image(&self) -> &ImageF {
        &self.masked_image.image
    }

    pub fn image_mut(&mut self) -> &mut ImageF {
        &mut self.masked_image.image
    }

    pub fn mask(&self) -> &Mask {
        &self.masked_image.mask
    }

    pub fn mask_mut(&mut self) -> &mut Mask {
        &mut self.masked_image.mask
    }

    pub fn variance(&self) -> &ImageF {
        &self.masked_image.variance
    }

    pub fn variance_mut(&mut self) -> &mut ImageF {
        &mut self.masked_image.variance
    }

    pub fn wcs(&self) -> Option<&Wcs> {
        self.wcs.as_ref()
    }

    pub fn set_wcs(&mut self, wcs: Wcs) {
        self.wcs = Some(wcs);
    }

    pub fn detector(&self) -> Option<&Detector> {
        self.detector.as_ref()
    }

    pub fn set_detector(&mut self, detector: Detector) {
        self.detector = Some(detector);
    }
}
