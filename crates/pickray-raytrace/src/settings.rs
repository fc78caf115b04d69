//! Tunables for ray casting.

use serde::{Deserialize, Serialize};

/// Raycast parameters.
///
/// Missing fields fall back to [`RaycastSettings::default`] when
/// deserialized, so a scene file may override any subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastSettings {
    /// A ray is parallel to a triangle's plane when
    /// `|normal . dir| <= parallel_epsilon * |dir|`, i.e. when the cosine
    /// between a unit normal and the direction is at most this value. The
    /// direction's length does not matter. `0.0` gives exact comparisons.
    pub parallel_epsilon: f64,
    /// Outward slack of the point-in-triangle test, in edge-coefficient
    /// units. The small default closes the rounding cracks along edges
    /// shared by neighbouring triangles.
    pub face_radius: f64,
    /// Reject meshes by their world-space bounding region before testing
    /// triangles.
    pub broad_phase: bool,
}

impl RaycastSettings {
    /// Exact zero comparisons and no containment slack.
    pub fn exact() -> Self {
        Self {
            parallel_epsilon: 0.0,
            face_radius: 0.0,
            broad_phase: true,
        }
    }
}

impl Default for RaycastSettings {
    fn default() -> Self {
        Self {
            parallel_epsilon: 1e-12,
            face_radius: 1e-9,
            broad_phase: true,
        }
    }
}
