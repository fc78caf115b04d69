//! Error types for ray and scene construction.
//!
//! Intersection queries themselves never fail; only the paths that build
//! rays, meshes and scenes from untrusted input return these.

use thiserror::Error;

/// Errors from validated ray construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayError {
    /// Direction vector has zero length.
    #[error("ray direction has zero length")]
    ZeroDirection,

    /// Origin or direction contains NaN or infinity.
    #[error("ray origin or direction is not finite")]
    NonFinite,
}

/// Errors while building a collision mesh from an index buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Index buffer length is not a multiple of 3.
    #[error("index buffer length {0} is not a multiple of 3")]
    IndexCount(usize),

    /// Index refers past the end of the vertex buffer.
    #[error("vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange {
        /// Offending index.
        index: u32,
        /// Number of vertices available.
        len: usize,
    },
}

/// Errors while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Malformed JSON.
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A mesh of the named object could not be built.
    #[error("object `{object}`: {source}")]
    Mesh {
        /// Object name.
        object: String,
        /// Underlying mesh error.
        #[source]
        source: MeshError,
    },

    /// The object's placement is invalid.
    #[error("object `{object}`: {reason}")]
    Transform {
        /// Object name.
        object: String,
        /// Why the placement was rejected.
        reason: String,
    },
}

/// Result type for scene loading.
pub type Result<T> = std::result::Result<T, SceneError>;
