//! Collision geometry: triangles, meshes and multi-mesh models.

use pickray_math::{Point3, Tolerance, Transform, Vec3};

use crate::bounds::BoundingRegion;
use crate::error::MeshError;
use crate::intersect::face_contains_point_range;

/// A triangle with an explicit face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex positions.
    pub vertices: [Point3; 3],
    /// Face normal. Unit length when computed by [`Triangle::new`]; zero for
    /// a degenerate triangle.
    pub normal: Vec3,
}

impl Triangle {
    /// Create a triangle whose normal follows the winding
    /// `(v1 - v0) x (v2 - v0)`.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Self {
        let normal = (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(0.0)
            .unwrap_or_else(Vec3::zeros);
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Create a triangle with a caller-supplied normal.
    pub fn with_normal(v0: Point3, v1: Point3, v2: Point3, normal: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Edges leaving the first vertex.
    pub fn edges(&self) -> (Vec3, Vec3) {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0, v2 - v0)
    }

    /// Surface area.
    pub fn area(&self) -> f64 {
        let (a, b) = self.edges();
        0.5 * a.cross(&b).norm()
    }

    /// True if the triangle is too thin to have a usable plane.
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        self.area() <= tol.min_area()
    }

    /// Mean of the three vertices.
    pub fn centroid(&self) -> Point3 {
        let [v0, v1, v2] = self.vertices;
        Point3::from((v0.coords + v1.coords + v2.coords) / 3.0)
    }

    /// Does `point` project onto this triangle? `radius` widens each edge
    /// by that fraction of the opposite edge coefficient range.
    pub fn contains_point(&self, point: &Point3, radius: f64) -> bool {
        let (a, b) = self.edges();
        face_contains_point_range(&a, &b, &self.normal, &(point - self.vertices[0]), radius)
    }

    /// Map the triangle through `transform`, carrying the normal with the
    /// inverse transpose and renormalizing it.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let normal = transform
            .apply_normal(&self.normal)
            .try_normalize(0.0)
            .unwrap_or_else(Vec3::zeros);
        Self {
            vertices: self.vertices.map(|v| transform.apply_point(&v)),
            normal,
        }
    }
}

/// An ordered list of triangles in the local space of a rigid body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionMesh {
    /// Triangles in mesh order.
    pub triangles: Vec<Triangle>,
}

impl CollisionMesh {
    /// Create a mesh from triangles.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Build from a vertex buffer and a triangle index buffer.
    ///
    /// Degenerate triangles are dropped with a warning; they have no plane
    /// to intersect.
    pub fn from_indexed(vertices: &[Point3], indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount(indices.len()));
        }

        let lookup = |index: u32| {
            vertices
                .get(index as usize)
                .copied()
                .ok_or(MeshError::IndexOutOfRange {
                    index,
                    len: vertices.len(),
                })
        };

        let tol = Tolerance::DEFAULT;
        let mut triangles = Vec::with_capacity(indices.len() / 3);
        for (face, chunk) in indices.chunks_exact(3).enumerate() {
            let tri = Triangle::new(lookup(chunk[0])?, lookup(chunk[1])?, lookup(chunk[2])?);
            if tri.is_degenerate(&tol) {
                log::warn!("skipping degenerate triangle {face} ({:?})", chunk);
                continue;
            }
            triangles.push(tri);
        }

        Ok(Self { triangles })
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// True if there are no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Local-space bounding region of all vertices.
    pub fn bounds(&self) -> BoundingRegion {
        BoundingRegion::from_points(self.triangles.iter().flat_map(|t| t.vertices.iter()))
    }
}

/// All collision meshes of one model, sharing one rigid body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionModel {
    /// Meshes in model order.
    pub meshes: Vec<CollisionMesh>,
}

impl CollisionModel {
    /// Create a model from meshes.
    pub fn new(meshes: Vec<CollisionMesh>) -> Self {
        Self { meshes }
    }

    /// Total triangle count over all meshes.
    pub fn num_triangles(&self) -> usize {
        self.meshes.iter().map(CollisionMesh::num_triangles).sum()
    }

    /// Local-space bounding region of all meshes.
    pub fn bounds(&self) -> BoundingRegion {
        let mut region = BoundingRegion::empty();
        for mesh in &self.meshes {
            region.include_region(&mesh.bounds());
        }
        region
    }
}

impl From<CollisionMesh> for CollisionModel {
    fn from(mesh: CollisionMesh) -> Self {
        Self { meshes: vec![mesh] }
    }
}
