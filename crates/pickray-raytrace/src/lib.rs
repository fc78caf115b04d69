#![warn(missing_docs)]

//! Ray casting against collision geometry for picking and interaction.
//!
//! A caller builds a [`Ray`], rejects objects cheaply with
//! [`Ray::intersects_bounding_region`], then refines the survivors triangle
//! by triangle with [`Ray::intersects_mesh`]. The per-triangle test combines
//! a line-plane classification with a point-in-face test solved as a small
//! linear system.
//!
//! # Architecture
//!
//! - [`Ray`] - origin, direction and precomputed reciprocal direction
//! - [`BoundingRegion`] - axis-aligned box for the broad phase
//! - [`intersect`] - line-plane classifier and face containment tests
//! - [`CollisionMesh`], [`CollisionModel`], [`RigidBody`] - geometry and placement
//! - [`Scene`] - index-addressed registry of objects with pick queries
//!
//! # Example
//!
//! ```
//! use pickray_math::{Point3, Vec3};
//! use pickray_raytrace::{CollisionMesh, Ray, RigidBody, Triangle};
//!
//! let mesh = CollisionMesh::new(vec![Triangle::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! )]);
//! let ray = Ray::new(Point3::new(0.25, 0.25, 2.0), Vec3::new(0.0, 0.0, -1.0));
//!
//! let t = ray.intersects_mesh(&mesh, &RigidBody::identity()).unwrap();
//! assert_eq!(t, 2.0);
//! ```

mod body;
mod bounds;
pub mod error;
pub mod intersect;
mod mesh;
mod ray;
pub mod scene;
mod settings;

pub use body::RigidBody;
pub use bounds::BoundingRegion;
pub use error::{MeshError, RayError, SceneError};
pub use intersect::LinePlaneIntersection;
pub use mesh::{CollisionMesh, CollisionModel, Triangle};
pub use ray::{Ray, RayHit};
pub use scene::{ObjectId, PickHit, Scene, SceneObject};
pub use settings::RaycastSettings;
