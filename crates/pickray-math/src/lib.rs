#![warn(missing_docs)]

//! Math types for pickray.
//!
//! Thin aliases over nalgebra for points, vectors and directions, an affine
//! [`Transform`], comparison [`Tolerance`]s, and the small dense solvers in
//! [`linalg`] that the intersection tests are built on.

pub mod linalg;
mod tolerance;
mod transform;

pub use linalg::{
    lin_comb_solution, lin_comb_solution_checked, rref, rref_with_tolerance, transform_point,
};
pub use tolerance::Tolerance;
pub use transform::Transform;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space (directions, normals, edge vectors).
pub type Vec3 = nalgebra::Vector3<f64>;

/// A unit-length direction in 3D space.
pub type Dir3 = nalgebra::Unit<nalgebra::Vector3<f64>>;

/// A 4x4 matrix in column-vector convention (translation in the last column).
pub type Mat4 = nalgebra::Matrix4<f64>;
