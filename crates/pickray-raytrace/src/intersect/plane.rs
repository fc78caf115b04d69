//! Line-plane intersection and classification.

use pickray_math::{Point3, Vec3};

/// How a line segment `[u1, u1 + side]` meets a plane.
///
/// `t` is only carried by the variants where the line actually crosses the
/// plane, so a parallel configuration cannot be mistaken for a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinePlaneIntersection {
    /// The line lies in the plane (`0 / 0`).
    Coplanar,
    /// The line is parallel to the plane and never touches it.
    Parallel,
    /// The plane is crossed at `u1 + side * t` with `0 <= t <= 1`.
    WithinSegment {
        /// Parameter along the line.
        t: f64,
    },
    /// The infinite line crosses the plane, but outside the segment.
    OutsideSegment {
        /// Parameter along the line (negative or greater than 1).
        t: f64,
    },
}

impl LinePlaneIntersection {
    /// Line parameter of the crossing, if there is one.
    pub fn t(&self) -> Option<f64> {
        match *self {
            Self::WithinSegment { t } | Self::OutsideSegment { t } => Some(t),
            Self::Coplanar | Self::Parallel => None,
        }
    }

    /// Numeric case label: 0 coplanar, 1 parallel, 2 within, 3 outside.
    pub fn case_index(&self) -> u8 {
        match self {
            Self::Coplanar => 0,
            Self::Parallel => 1,
            Self::WithinSegment { .. } => 2,
            Self::OutsideSegment { .. } => 3,
        }
    }

    /// True if the crossing lies on the finite segment.
    pub fn is_within_segment(&self) -> bool {
        matches!(self, Self::WithinSegment { .. })
    }
}

/// Classify the line `u1 + side * t` against the plane through `p1` with
/// normal `norm`.
///
/// Uses exact comparisons against zero, so a line that is parallel up to
/// rounding still produces a (huge) `t`. See
/// [`line_plane_intersection_eps`] for a tolerant variant.
pub fn line_plane_intersection(
    p1: &Point3,
    norm: &Vec3,
    u1: &Point3,
    side: &Vec3,
) -> LinePlaneIntersection {
    line_plane_intersection_eps(p1, norm, u1, side, 0.0)
}

/// [`line_plane_intersection`] treating `|norm . side| <= eps` as parallel
/// and `|norm . (p1 - u1)| <= eps` as lying in the plane.
///
/// `eps` is compared against raw dot products, so it scales with the
/// lengths of `norm` and `side`.
pub fn line_plane_intersection_eps(
    p1: &Point3,
    norm: &Vec3,
    u1: &Point3,
    side: &Vec3,
    eps: f64,
) -> LinePlaneIntersection {
    let tnum = norm.dot(&(p1 - u1));
    let tden = norm.dot(side);

    if tden.abs() <= eps {
        return if tnum.abs() <= eps {
            LinePlaneIntersection::Coplanar
        } else {
            LinePlaneIntersection::Parallel
        };
    }

    let t = tnum / tden;
    if (0.0..=1.0).contains(&t) {
        LinePlaneIntersection::WithinSegment { t }
    } else {
        LinePlaneIntersection::OutsideSegment { t }
    }
}
