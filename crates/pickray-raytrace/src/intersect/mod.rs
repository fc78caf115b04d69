//! Primitive intersection tests used by the ray queries.
//!
//! - [`line_plane_intersection`] classifies a line segment against a plane.
//! - [`face_contains_point`] decides whether a point projects onto a
//!   triangular face.

mod face;
mod plane;

pub use face::{face_contains_point, face_contains_point_range};
pub use plane::{line_plane_intersection, line_plane_intersection_eps, LinePlaneIntersection};
