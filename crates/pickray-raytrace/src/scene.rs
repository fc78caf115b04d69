//! A flat registry of placed collision models, and picking against it.
//!
//! Objects are addressed by their index in the registry ([`ObjectId`]);
//! nothing holds a pointer back into the scene, so a scene can be shared
//! read-only across threads while rays are cast against it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use pickray_math::{Point3, Transform, Vec3};

use crate::body::RigidBody;
use crate::bounds::BoundingRegion;
use crate::error::{Result, SceneError};
use crate::mesh::{CollisionMesh, CollisionModel};
use crate::ray::{Ray, RayHit};
use crate::settings::RaycastSettings;

/// Index of an object in a [`Scene`].
pub type ObjectId = usize;

/// A named collision model and its placement.
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Display name.
    pub name: String,
    /// Collision geometry in local space.
    pub model: CollisionModel,
    /// Local-to-world placement.
    pub body: RigidBody,
}

impl SceneObject {
    /// Create a scene object.
    pub fn new(name: impl Into<String>, model: CollisionModel, body: RigidBody) -> Self {
        Self {
            name: name.into(),
            model,
            body,
        }
    }

    /// World-space bounding region.
    pub fn world_bounds(&self) -> BoundingRegion {
        self.model.bounds().transformed(self.body.transform())
    }
}

/// A ray hit on a specific scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Object that was hit.
    pub object: ObjectId,
    /// Hit details.
    pub hit: RayHit,
}

/// Registry of pickable objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    settings: RaycastSettings,
}

impl Scene {
    /// Create an empty scene with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with the given settings.
    pub fn with_settings(settings: RaycastSettings) -> Self {
        Self {
            objects: Vec::new(),
            settings,
        }
    }

    /// Add an object, returning its id.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Look up an object.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Mutable access to an object, e.g. to move its body.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// All objects in id order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Raycast settings used by the pick queries.
    pub fn settings(&self) -> &RaycastSettings {
        &self.settings
    }

    /// Replace the raycast settings.
    pub fn set_settings(&mut self, settings: RaycastSettings) {
        self.settings = settings;
    }

    /// Nearest object hit by `ray`.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let mut nearest: Option<PickHit> = None;
        for (object, obj) in self.objects.iter().enumerate() {
            if let Some(hit) = ray.intersects_model(&obj.model, &obj.body, &self.settings) {
                if nearest.map_or(true, |best| hit.t < best.hit.t) {
                    nearest = Some(PickHit { object, hit });
                }
            }
        }

        match &nearest {
            Some(p) => log::debug!("picked `{}` at t = {}", self.objects[p.object].name, p.hit.t),
            None => log::debug!("pick missed all {} objects", self.objects.len()),
        }
        nearest
    }

    /// Every object hit by `ray`, nearest first.
    pub fn pick_all(&self, ray: &Ray) -> Vec<PickHit> {
        let mut hits: Vec<PickHit> = self
            .objects
            .iter()
            .enumerate()
            .filter_map(|(object, obj)| {
                ray.intersects_model(&obj.model, &obj.body, &self.settings)
                    .map(|hit| PickHit { object, hit })
            })
            .collect();
        hits.sort_by(|a, b| a.hit.t.total_cmp(&b.hit.t));
        hits
    }

    /// [`Scene::pick`] for many rays in parallel. Results are in ray order.
    pub fn pick_batch(&self, rays: &[Ray]) -> Vec<Option<PickHit>> {
        rays.par_iter().map(|ray| self.pick(ray)).collect()
    }

    /// Load a scene from its JSON description.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SceneFile = serde_json::from_str(json)?;
        file.into_scene()
    }
}

/// Serialized scene: settings plus a list of objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    /// Raycast settings; omitted fields use defaults.
    #[serde(default)]
    pub settings: RaycastSettings,
    /// Objects in id order.
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

/// Serialized scene object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDesc {
    /// Display name.
    pub name: String,
    /// Meshes making up the model.
    pub meshes: Vec<MeshDesc>,
    /// Row-major 4x4 local-to-world matrix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<[[f64; 4]; 4]>,
    /// Translation, as a shorthand for `transform`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f64; 3]>,
}

/// Serialized indexed triangle mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDesc {
    /// Vertex positions.
    pub vertices: Vec<[f64; 3]>,
    /// Triangle vertex indices, three per triangle.
    pub indices: Vec<u32>,
}

impl SceneFile {
    /// Build the runtime scene, validating every object.
    pub fn into_scene(self) -> Result<Scene> {
        let mut scene = Scene::with_settings(self.settings);
        for desc in self.objects {
            let object = desc.into_object()?;
            log::debug!(
                "loaded `{}`: {} meshes, {} triangles",
                object.name,
                object.model.meshes.len(),
                object.model.num_triangles()
            );
            scene.add(object);
        }
        Ok(scene)
    }
}

impl ObjectDesc {
    fn into_object(self) -> Result<SceneObject> {
        let body = match (self.transform, self.translation) {
            (Some(_), Some(_)) => {
                return Err(SceneError::Transform {
                    object: self.name,
                    reason: "both `transform` and `translation` given".into(),
                })
            }
            (Some(rows), None) => {
                let transform = Transform::from_rows(rows);
                if !transform.is_affine() {
                    return Err(SceneError::Transform {
                        object: self.name,
                        reason: "transform bottom row must be [0, 0, 0, 1]".into(),
                    });
                }
                RigidBody::new(transform)
            }
            (None, Some([x, y, z])) => RigidBody::at_position(Vec3::new(x, y, z)),
            (None, None) => RigidBody::identity(),
        };

        let mut meshes = Vec::with_capacity(self.meshes.len());
        for mesh in &self.meshes {
            let vertices: Vec<Point3> = mesh.vertices.iter().map(|&v| Point3::from(v)).collect();
            let built = CollisionMesh::from_indexed(&vertices, &mesh.indices).map_err(|source| {
                SceneError::Mesh {
                    object: self.name.clone(),
                    source,
                }
            })?;
            meshes.push(built);
        }

        Ok(SceneObject::new(self.name, CollisionModel::new(meshes), body))
    }
}
