//! Point-in-triangle containment via a linear-combination solve.
//!
//! The point is written as `c0 * a + c1 * b + c2 * n`, where `a` and `b` are
//! two edges leaving a shared vertex and `n` is the face normal. The normal
//! only completes the basis; `c2` is the (scaled) distance from the plane
//! and is not constrained, so the tests answer "does the point project onto
//! the face".

use pickray_math::{lin_comb_solution, Vec3};

/// Test whether `point` (relative to the shared vertex of edges `a` and `b`)
/// projects inside the triangle they span.
pub fn face_contains_point(a: &Vec3, b: &Vec3, n: &Vec3, point: &Vec3) -> bool {
    face_contains_point_range(a, b, n, point, 0.0)
}

/// [`face_contains_point`] with each bounding half-plane pushed outward by
/// `radius`, measured in edge-coefficient units.
///
/// Accepts when `c0 >= -radius`, `c1 >= -radius` and
/// `c0 + c1 <= 1 + radius`.
pub fn face_contains_point_range(a: &Vec3, b: &Vec3, n: &Vec3, point: &Vec3, radius: f64) -> bool {
    let c = lin_comb_solution(a, b, n, point);
    c.x >= -radius && c.y >= -radius && c.x + c.y <= 1.0 + radius
}
