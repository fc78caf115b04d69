//! Affine transforms for placing collision geometry in the world.

use crate::linalg::transform_point;
use crate::{Dir3, Mat4, Point3, Vec3};

/// A 4x4 affine transformation (column vectors, translation in the last
/// column).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Mat4,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
        }
    }

    /// Wrap an existing matrix.
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Build from rows, `rows[r][c]` being row `r`, column `c`.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self {
            matrix: Mat4::from_fn(|r, c| rows[r][c]),
        }
    }

    /// Translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        Self {
            matrix: Mat4::new_translation(&offset),
        }
    }

    /// Non-uniform scale about the origin.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Mat4::new_nonuniform_scaling(&Vec3::new(sx, sy, sz)),
        }
    }

    /// Rotation about the X axis.
    pub fn rotation_x(angle: f64) -> Self {
        Self::rotation_about_axis(&Vec3::x_axis(), angle)
    }

    /// Rotation about the Y axis.
    pub fn rotation_y(angle: f64) -> Self {
        Self::rotation_about_axis(&Vec3::y_axis(), angle)
    }

    /// Rotation about the Z axis.
    pub fn rotation_z(angle: f64) -> Self {
        Self::rotation_about_axis(&Vec3::z_axis(), angle)
    }

    /// Rotation by `angle` radians about `axis` through the origin.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        Self {
            matrix: Mat4::from_axis_angle(axis, angle),
        }
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point (implicit `w = 1`).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        Point3::from(transform_point(&self.matrix, &p.coords))
    }

    /// Transform a direction (implicit `w = 0`, translation ignored).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.matrix.fixed_view::<3, 3>(0, 0) * v
    }

    /// Transform a surface normal with the inverse transpose of the linear
    /// part. The result is not renormalized.
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        let linear = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        match linear.try_inverse() {
            Some(inv) => inv.transpose() * n,
            // Singular (e.g. zero scale): fall back to the linear part.
            None => linear * n,
        }
    }

    /// World-space position of the local origin.
    pub fn origin(&self) -> Point3 {
        self.apply_point(&Point3::origin())
    }

    /// True if the bottom row is `[0, 0, 0, 1]` and every entry is finite.
    ///
    /// Points are mapped without a perspective divide, so only affine
    /// matrices place geometry correctly.
    pub fn is_affine(&self) -> bool {
        let bottom = self.matrix.row(3);
        bottom[0] == 0.0
            && bottom[1] == 0.0
            && bottom[2] == 0.0
            && bottom[3] == 1.0
            && self.matrix.iter().all(|v| v.is_finite())
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(Self::from_matrix)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
