/// A linear world coordinate transform.
///
/// Sky positions are computed as `crval + cd * (pixel - crpix)`, with the CD
/// matrix in degrees per pixel. Adequate for fixtures; no projection terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wcs {
    /// Sky position (RA, Dec) in degrees at the reference pixel.
    pub crval: (f64, f64),
    /// Reference pixel position.
    pub crpix: (f64, f64),
    /// Linear transform matrix, degrees per pixel.
    pub cd: [[f64; 2]; 2],
}

impl Wcs {
    pub fn new(crval: (f64, f64), crpix: (f64, f64), cd: [[f64; 2]; 2]) -> Self {
        Self { crval, crpix, cd }
    }

    pub fn pixel_to_sky(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.crpix.0;
        let dy = y - self.crpix.1;
        (
            self.crval.0 + self.cd[0][0] * dx + self.cd[0][1] * dy,
            self.crval.1 + self.cd[1][0] * dx + self.cd[1][1] * dy,
        )
    }
}
