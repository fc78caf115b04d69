//! Rigid-body placement of collision geometry.

use pickray_math::{Point3, Transform, Vec3};

/// World placement of a collision model.
///
/// Ray queries only read the transform; the body never owns or outlives the
/// geometry it places.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RigidBody {
    transform: Transform,
}

impl RigidBody {
    /// Create a body with the given local-to-world transform.
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }

    /// A body at the world origin with no rotation or scale.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A body translated to `position`.
    pub fn at_position(position: Vec3) -> Self {
        Self::new(Transform::translation(position))
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Replace the local-to-world transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// World-space position of the body's origin.
    pub fn position(&self) -> Point3 {
        self.transform.origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let body = RigidBody::at_position(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(body.position(), Point3::new(1.0, -2.0, 3.0));
        assert_eq!(RigidBody::identity().position(), Point3::origin());
    }
}
