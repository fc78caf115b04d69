//! Ray representation and ray queries against regions and meshes.

use pickray_math::{Point3, Tolerance, Vec3};

use crate::body::RigidBody;
use crate::bounds::BoundingRegion;
use crate::error::RayError;
use crate::intersect::{line_plane_intersection_eps, LinePlaneIntersection};
use crate::mesh::{CollisionMesh, CollisionModel, Triangle};
use crate::settings::RaycastSettings;

/// A half-line `origin + t * dir`, `t >= 0`.
///
/// `dir` is kept as given, so `t` is measured in multiples of its length.
/// Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    dir: Vec3,
    /// Component-wise reciprocal of `dir`, for the slab test.
    invdir: Vec3,
}

impl Ray {
    /// Create a ray. A zero direction component gives an infinite
    /// reciprocal, which the slab test handles; a zero direction overall is
    /// the caller's problem (see [`Ray::try_new`]).
    pub fn new(origin: Point3, dir: Vec3) -> Self {
        Self {
            origin,
            dir,
            invdir: dir.map(|d| 1.0 / d),
        }
    }

    /// Create a ray, rejecting zero-length or non-finite input.
    pub fn try_new(origin: Point3, dir: Vec3) -> Result<Self, RayError> {
        if !origin.iter().chain(dir.iter()).all(|v| v.is_finite()) {
            return Err(RayError::NonFinite);
        }
        if dir == Vec3::zeros() {
            return Err(RayError::ZeroDirection);
        }
        Ok(Self::new(origin, dir))
    }

    /// Ray from `from` through `to`; `t = 1` lands on `to`.
    pub fn between(from: Point3, to: Point3) -> Self {
        Self::new(from, to - from)
    }

    /// Origin point.
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Direction (not necessarily unit length).
    pub fn dir(&self) -> &Vec3 {
        &self.dir
    }

    /// Component-wise reciprocal of the direction.
    pub fn invdir(&self) -> &Vec3 {
        &self.invdir
    }

    /// Evaluate the ray at parameter `t`: `origin + t * dir`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.dir * t
    }

    /// Slab test against an axis-aligned region.
    ///
    /// Returns `Some((tmin, tmax))`, the parameters where the line enters
    /// and leaves the region, when that interval is non-empty and not
    /// entirely behind the origin (`tmax >= max(tmin, 0)`). `tmin` is not
    /// clamped, so it is negative when the origin is inside.
    ///
    /// An axis the ray runs parallel to never constrains the interval if
    /// the origin lies within that slab, and rejects the ray otherwise. An
    /// empty region is never hit.
    pub fn intersects_bounding_region(&self, region: &BoundingRegion) -> Option<(f64, f64)> {
        if region.is_empty() {
            return None;
        }

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let (lo, hi) = (region.min[axis], region.max[axis]);
            let inv = self.invdir[axis];

            if !inv.is_finite() {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t0 = (lo - origin) * inv;
            let t1 = (hi - origin) * inv;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
        }

        if t_max >= t_min.max(0.0) {
            Some((t_min, t_max))
        } else {
            None
        }
    }

    /// Hit parameter against one world-space triangle, if any.
    ///
    /// The triangle's plane is intersected first; the crossing must lie on
    /// or ahead of the origin and project inside the triangle. A ray lying
    /// in the triangle's plane counts as a miss.
    pub fn intersects_triangle(&self, tri: &Triangle, settings: &RaycastSettings) -> Option<f64> {
        // Parallel and coplanar are both misses, so only the denominator
        // threshold matters; scale it so it bounds the cosine, not |dir|.
        let eps = settings.parallel_epsilon * self.dir.norm();
        let hit = line_plane_intersection_eps(&tri.vertices[0], &tri.normal, &self.origin, &self.dir, eps);

        let t = match hit {
            LinePlaneIntersection::WithinSegment { t } | LinePlaneIntersection::OutsideSegment { t }
                if t >= 0.0 =>
            {
                t
            }
            _ => {
                log::trace!("triangle rejected by plane test: {hit:?}");
                return None;
            }
        };

        if tri.contains_point(&self.at(t), settings.face_radius) {
            Some(t)
        } else {
            None
        }
    }

    /// Nearest hit against a mesh placed by `body`, with default settings.
    ///
    /// Returns the smallest non-negative `t` over all triangles.
    pub fn intersects_mesh(&self, mesh: &CollisionMesh, body: &RigidBody) -> Option<f64> {
        self.intersects_mesh_with(mesh, body, &RaycastSettings::default())
    }

    /// [`Ray::intersects_mesh`] with explicit settings.
    pub fn intersects_mesh_with(
        &self,
        mesh: &CollisionMesh,
        body: &RigidBody,
        settings: &RaycastSettings,
    ) -> Option<f64> {
        self.nearest_triangle(mesh, body, settings).map(|(t, _, _)| t)
    }

    /// Nearest hit over every mesh of a model.
    ///
    /// With `settings.broad_phase` each mesh is first tested against its
    /// world-space bounding region; meshes the ray misses, or enters beyond
    /// the current best hit, are skipped.
    pub fn intersects_model(
        &self,
        model: &CollisionModel,
        body: &RigidBody,
        settings: &RaycastSettings,
    ) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;

        for (mesh_index, mesh) in model.meshes.iter().enumerate() {
            if mesh.is_empty() {
                continue;
            }

            if settings.broad_phase {
                let region = broad_phase_region(mesh, body, settings);
                match self.intersects_bounding_region(&region) {
                    None => {
                        log::debug!("mesh {mesh_index}: rejected by bounding region");
                        continue;
                    }
                    Some((t_enter, _)) if nearest.is_some_and(|hit| t_enter > hit.t) => continue,
                    Some(_) => {}
                }
            }

            if let Some((t, triangle_index, normal)) = self.nearest_triangle(mesh, body, settings) {
                if nearest.map_or(true, |hit| t < hit.t) {
                    nearest = Some(RayHit {
                        t,
                        point: self.at(t),
                        normal,
                        mesh_index,
                        triangle_index,
                    });
                }
            }
        }

        nearest
    }

    /// `(t, triangle index, world normal)` of the nearest triangle hit.
    fn nearest_triangle(
        &self,
        mesh: &CollisionMesh,
        body: &RigidBody,
        settings: &RaycastSettings,
    ) -> Option<(f64, usize, Vec3)> {
        let transform = body.transform();
        let mut nearest: Option<(f64, usize, Vec3)> = None;

        for (index, tri) in mesh.triangles.iter().enumerate() {
            let world = tri.transformed(transform);
            if let Some(t) = self.intersects_triangle(&world, settings) {
                if nearest.map_or(true, |(best, _, _)| t < best) {
                    nearest = Some((t, index, world.normal));
                }
            }
        }

        nearest
    }
}

/// World-space region a mesh can be hit in, widened for the containment
/// slack so the broad phase never rejects what the narrow phase would
/// accept.
fn broad_phase_region(mesh: &CollisionMesh, body: &RigidBody, settings: &RaycastSettings) -> BoundingRegion {
    let mut region = mesh.bounds().transformed(body.transform());
    // Coefficient slack r moves an edge outward by at most 2r of the extent.
    region.inflate(2.0 * settings.face_radius);
    region.expand(Tolerance::DEFAULT.linear);
    region
}

/// Result of a ray-model intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parameter along the ray.
    pub t: f64,
    /// World-space hit point.
    pub point: Point3,
    /// World-space unit normal of the triangle that was hit.
    pub normal: Vec3,
    /// Index of the mesh within its model.
    pub mesh_index: usize,
    /// Index of the triangle within its mesh.
    pub triangle_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pickray_math::{Dir3, Transform};
    use std::f64::consts::FRAC_PI_2;

    fn unit_box() -> BoundingRegion {
        BoundingRegion::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    fn triangle_at_z(z: f64) -> Triangle {
        Triangle::new(
            Point3::new(-1.0, -1.0, z),
            Point3::new(2.0, -1.0, z),
            Point3::new(-1.0, 2.0, z),
        )
    }

    #[test]
    fn test_invdir_is_reciprocal() {
        let ray = Ray::new(Point3::origin(), Vec3::new(2.0, -4.0, 0.5));
        assert_eq!(*ray.invdir(), Vec3::new(0.5, -0.25, 2.0));
        let axis = Ray::new(Point3::origin(), Vec3::x());
        assert!(axis.invdir().y.is_infinite());
    }

    #[test]
    fn test_try_new_validation() {
        assert_eq!(Ray::try_new(Point3::origin(), Vec3::zeros()), Err(RayError::ZeroDirection));
        assert_eq!(
            Ray::try_new(Point3::new(f64::NAN, 0.0, 0.0), Vec3::x()),
            Err(RayError::NonFinite)
        );
        assert!(Ray::try_new(Point3::origin(), Vec3::new(0.0, 0.0, -3.0)).is_ok());
    }

    #[test]
    fn test_at_and_between() {
        let ray = Ray::between(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 1.0, 5.0));
        assert_eq!(ray.at(0.5), Point3::new(2.0, 1.0, 3.0));
        assert_eq!(ray.at(1.0), Point3::new(3.0, 1.0, 5.0));
    }

    #[test]
    fn test_region_hit_from_outside() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::x());
        let (t_min, t_max) = ray.intersects_bounding_region(&unit_box()).unwrap();
        assert_relative_eq!(t_min, 5.0);
        assert_relative_eq!(t_max, 6.0);
    }

    #[test]
    fn test_region_origin_inside() {
        let ray = Ray::new(Point3::new(0.5, 0.25, 0.75), Vec3::new(1.0, 2.0, -0.5));
        let (t_min, t_max) = ray.intersects_bounding_region(&unit_box()).unwrap();
        assert!(t_min <= 0.0 && 0.0 <= t_max);
    }

    #[test]
    fn test_region_pointing_away() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(ray.intersects_bounding_region(&unit_box()).is_none());
        let diag = Ray::new(Point3::new(2.0, 2.0, 2.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(diag.intersects_bounding_region(&unit_box()).is_none());
    }

    #[test]
    fn test_region_empty_is_never_hit() {
        let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 1.0, 1.0));
        assert!(ray.intersects_bounding_region(&BoundingRegion::empty()).is_none());
        assert!(ray.intersects_bounding_region(&BoundingRegion::default()).is_none());
        let inverted = BoundingRegion::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0));
        assert!(ray.intersects_bounding_region(&inverted).is_none());
    }

    #[test]
    fn test_region_miss_beside() {
        let ray = Ray::new(Point3::new(-5.0, 5.0, 5.0), Vec3::x());
        assert!(ray.intersects_bounding_region(&unit_box()).is_none());
    }

    #[test]
    fn test_region_axis_parallel_on_slab_boundary() {
        // Origin exactly on the y = 0 face with zero y direction: the
        // infinite reciprocal must not turn into NaN.
        let ray = Ray::new(Point3::new(-1.0, 0.0, 0.5), Vec3::x());
        let (t_min, t_max) = ray.intersects_bounding_region(&unit_box()).unwrap();
        assert_relative_eq!(t_min, 1.0);
        assert_relative_eq!(t_max, 2.0);
        assert!(t_min.is_finite() && t_max.is_finite());
    }

    #[test]
    fn test_region_negative_zero_direction() {
        let ray = Ray::new(Point3::new(0.5, 3.0, 0.5), Vec3::new(-0.0, -1.0, 0.0));
        let (t_min, t_max) = ray.intersects_bounding_region(&unit_box()).unwrap();
        assert_relative_eq!(t_min, 2.0);
        assert_relative_eq!(t_max, 3.0);
    }

    #[test]
    fn test_region_diagonal() {
        let ray = Ray::new(Point3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let (t_min, t_max) = ray.intersects_bounding_region(&unit_box()).unwrap();
        assert_relative_eq!(t_min, 1.0);
        assert_relative_eq!(t_max, 2.0);
    }

    #[test]
    fn test_mesh_hit_at_centroid() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        let mesh = CollisionMesh::new(vec![tri]);
        let body = RigidBody::at_position(Vec3::new(0.0, 0.0, -4.0));
        // Centroid in world space is (1, 1, -4).
        let ray = Ray::new(Point3::new(1.0, 1.0, 6.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray.intersects_mesh(&mesh, &body).unwrap();
        assert_relative_eq!(t, 10.0, epsilon = 1e-12);
        assert_relative_eq!(ray.at(t), Point3::new(1.0, 1.0, -4.0), epsilon = 1e-12);
    }

    #[test]
    fn test_mesh_hit_respects_dir_length() {
        let mesh = CollisionMesh::new(vec![triangle_at_z(0.0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 8.0), Vec3::new(0.0, 0.0, -2.0));
        let t = ray.intersects_mesh(&mesh, &RigidBody::identity()).unwrap();
        assert_relative_eq!(t, 4.0);
    }

    #[test]
    fn test_short_direction_still_hits() {
        let mesh = CollisionMesh::new(vec![triangle_at_z(0.0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1e-13));
        let t = ray.intersects_mesh(&mesh, &RigidBody::identity()).unwrap();
        assert_relative_eq!(t, 1e13, max_relative = 1e-12);
        // Tilted away from the plane by less than the tolerance: parallel.
        let grazing = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(1e-13, 0.0, -1e-26));
        assert!(grazing.intersects_mesh(&mesh, &RigidBody::identity()).is_none());
    }

    #[test]
    fn test_mesh_miss_parallel_plane() {
        let mesh = CollisionMesh::new(vec![triangle_at_z(0.0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.5, 0.0));
        assert!(ray.intersects_mesh(&mesh, &RigidBody::identity()).is_none());
        // Lying in the plane is also a miss.
        let grazing = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::x());
        assert!(grazing.intersects_mesh(&mesh, &RigidBody::identity()).is_none());
    }

    #[test]
    fn test_mesh_miss_behind_and_beside() {
        let mesh = CollisionMesh::new(vec![triangle_at_z(0.0)]);
        let away = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::z());
        assert!(away.intersects_mesh(&mesh, &RigidBody::identity()).is_none());
        let beside = Ray::new(Point3::new(5.0, 5.0, 1.0), -Vec3::z());
        assert!(beside.intersects_mesh(&mesh, &RigidBody::identity()).is_none());
    }

    #[test]
    fn test_nearest_hit_not_first_in_order() {
        // Farther triangle first in mesh order.
        let mesh = CollisionMesh::new(vec![triangle_at_z(-5.0), triangle_at_z(-2.0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), -Vec3::z());
        let t = ray.intersects_mesh(&mesh, &RigidBody::identity()).unwrap();
        assert_relative_eq!(t, 2.0);
    }

    #[test]
    fn test_hit_at_origin_counts() {
        let mesh = CollisionMesh::new(vec![triangle_at_z(0.0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), -Vec3::z());
        assert_eq!(ray.intersects_mesh(&mesh, &RigidBody::identity()), Some(0.0));
    }

    #[test]
    fn test_rotated_body() {
        // Quarter turn about x maps the z = -2 plane to y = 2.
        let axis = Dir3::new_normalize(Vec3::x());
        let body = RigidBody::new(Transform::rotation_about_axis(&axis, FRAC_PI_2));
        let mesh = CollisionMesh::new(vec![triangle_at_z(-2.0)]);
        let ray = Ray::new(Point3::new(0.0, -3.0, 0.0), Vec3::y());
        let t = ray.intersects_mesh(&mesh, &body).unwrap();
        assert_relative_eq!(t, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_radius_widens_hits() {
        let tri = Triangle::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0));
        let mesh = CollisionMesh::new(vec![tri]);
        let ray = Ray::new(Point3::new(0.55, 0.55, 1.0), -Vec3::z());
        let body = RigidBody::identity();
        assert!(ray.intersects_mesh(&mesh, &body).is_none());

        let loose = RaycastSettings {
            face_radius: 0.2,
            ..RaycastSettings::default()
        };
        assert!(ray.intersects_mesh_with(&mesh, &body, &loose).is_some());
        // The widened broad phase must not reject it either.
        let hit = ray.intersects_model(&CollisionModel::from(mesh), &body, &loose).unwrap();
        assert_relative_eq!(hit.t, 1.0);
    }

    #[test]
    fn test_model_nearest_across_meshes() {
        let model = CollisionModel::new(vec![
            CollisionMesh::new(vec![triangle_at_z(-6.0)]),
            CollisionMesh::default(),
            CollisionMesh::new(vec![triangle_at_z(-1.0), triangle_at_z(-3.0)]),
        ]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), -Vec3::z());
        for settings in [RaycastSettings::default(), RaycastSettings { broad_phase: false, ..RaycastSettings::default() }] {
            let hit = ray.intersects_model(&model, &RigidBody::identity(), &settings).unwrap();
            assert_relative_eq!(hit.t, 1.0);
            assert_eq!(hit.mesh_index, 2);
            assert_eq!(hit.triangle_index, 0);
            assert_relative_eq!(hit.normal, Vec3::z());
            assert_relative_eq!(hit.point, Point3::new(0.0, 0.0, -1.0));
        }
    }

    #[test]
    fn test_model_miss() {
        let model = CollisionModel::from(CollisionMesh::new(vec![triangle_at_z(-1.0)]));
        let ray = Ray::new(Point3::new(10.0, 10.0, 0.0), -Vec3::z());
        assert!(ray
            .intersects_model(&model, &RigidBody::identity(), &RaycastSettings::default())
            .is_none());
    }
}
