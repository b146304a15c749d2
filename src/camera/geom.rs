//! Integer rectangle arithmetic for detector layouts
//!
//! Boxes are axis-aligned, inclusive of their minimum corner and exclusive of
//! `min + dimensions`. An empty box is the identity for `include`.

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point2I {
    pub x: i32,
    pub y: i32,
}

impl Point2I {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An offset or size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent2I {
    pub x: i32,
    pub y: i32,
}

impl Extent2I {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned integer box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Box2I {
    min: Point2I,
    dims: Extent2I,
}

impl Box2I {
    pub fn new(min: Point2I, dims: Extent2I) -> Self {
        Self { min, dims }
    }

    /// An empty box; `include` treats it as the identity.
    pub fn empty() -> Self {
        Self {
            min: Point2I::new(0, 0),
            dims: Extent2I::new(0, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dims.x <= 0 || self.dims.y <= 0
    }

    pub fn min(&self) -> Point2I {
        self.min
    }

    /// The last pixel inside the box (undefined for empty boxes).
    pub fn max(&self) -> Point2I {
        Point2I::new(self.min.x + self.dims.x - 1, self.min.y + self.dims.y - 1)
    }

    pub fn dimensions(&self) -> Extent2I {
        self.dims
    }

    pub fn width(&self) -> i32 {
        self.dims.x
    }

    pub fn height(&self) -> i32 {
        self.dims.y
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.dims.x as i64 * self.dims.y as i64
        }
    }

    /// Translates the box by `offset`.
    pub fn shift(&mut self, offset: Extent2I) {
        self.min.x += offset.x;
        self.min.y += offset.y;
    }

    pub fn shifted(&self, offset: Extent2I) -> Self {
        let mut out = *self;
        out.shift(offset);
        out
    }

    /// Mirrors the box about the vertical center line of a frame `span`
    /// pixels wide whose origin is at x = 0.
    pub fn flip_lr(&mut self, span: i32) {
        self.min.x = span - (self.min.x + self.dims.x);
    }

    /// Mirrors the box about the horizontal center line of a frame `span`
    /// pixels tall whose origin is at y = 0.
    pub fn flip_tb(&mut self, span: i32) {
        self.min.y = span - (self.min.y + self.dims.y);
    }

    /// Grows the box to the bounding hull of itself and `other`.
    pub fn include(&mut self, other: &Box2I) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }
        let min_x = self.min.x.min(other.min.x);
        let min_y = self.min.y.min(other.min.y);
        let max_x = (self.min.x + self.dims.x).max(other.min.x + other.dims.x);
        let max_y = (self.min.y + self.dims.y).max(other.min.y + other.dims.y);
        self.min = Point2I::new(min_x, min_y);
        self.dims = Extent2I::new(max_x - min_x, max_y - min_y);
    }

    pub fn contains_point(&self, p: Point2I) -> bool {
        !self.is_empty()
            && p.x >= self.min.x
            && p.y >= self.min.y
            && p.x < self.min.x + self.dims.x
            && p.y < self.min.y + self.dims.y
    }

    pub fn contains(&self, other: &Box2I) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty()
            && other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.min.x + other.dims.x <= self.min.x + self.dims.x
            && other.min.y + other.dims.y <= self.min.y + self.dims.y
    }

    pub fn overlaps(&self, other: &Box2I) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x < other.min.x + other.dims.x
            && other.min.x < self.min.x + self.dims.x
            && self.min.y < other.min.y + other.dims.y
            && other.min.y < self.min.y + self.dims.y
    }
}

impl std::fmt::Display for Box2I {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[({},{}) {}x{}]",
            self.min.x, self.min.y, self.dims.x, self.dims.y
        )
    }
}
