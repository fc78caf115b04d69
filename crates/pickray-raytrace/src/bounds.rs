//! Axis-aligned bounding regions.
//!
//! Used as the broad phase of a ray cast: a mesh is only refined triangle
//! by triangle once the ray has entered its region.

use pickray_math::{Point3, Transform, Vec3};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingRegion {
    /// Create a region from its min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// An empty (inverted) region, the identity for [`include_point`](Self::include_point).
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest region containing every point.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut region = Self::empty();
        for p in points {
            region.include_point(p);
        }
        region
    }

    /// True if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the region to include `p`.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Grow the region to include another region.
    pub fn include_region(&mut self, other: &BoundingRegion) {
        if other.is_empty() {
            return;
        }
        self.include_point(&other.min);
        self.include_point(&other.max);
    }

    /// True if `p` lies inside or on the boundary.
    pub fn contains_point(&self, p: &Point3) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    /// Test if two regions overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &BoundingRegion) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && self.max[axis] >= other.min[axis])
    }

    /// Grow by an absolute distance on every side.
    pub fn expand(&mut self, distance: f64) {
        let d = Vec3::repeat(distance);
        self.min -= d;
        self.max += d;
    }

    /// Grow each axis by `factor` times its own extent on both sides.
    pub fn inflate(&mut self, factor: f64) {
        let grow = self.extent() * factor;
        self.min -= grow;
        self.max += grow;
    }

    /// Size along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// The eight corner points.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned region enclosing this one after `transform`.
    ///
    /// Conservative under rotation: the result bounds the eight transformed
    /// corners, not the transformed contents.
    pub fn transformed(&self, transform: &Transform) -> Self {
        if self.is_empty() {
            return *self;
        }
        let corners = self.corners().map(|c| transform.apply_point(&c));
        Self::from_points(corners.iter())
    }
}

impl Default for BoundingRegion {
    fn default() -> Self {
        Self::empty()
    }
}
