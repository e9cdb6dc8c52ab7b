//! Mesh geometry

use partforge_core::{Bounds, Mat4x4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Four bone influences of one vertex
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoneWeight {
    pub indices: [i32; 4],
    pub weights: [f32; 4],
}

/// Triangle mesh with optional per-vertex channels
///
/// Optional channels are only meaningful when they hold exactly one entry
/// per vertex; the exporter skips any channel that does not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub uv0: Vec<Vec2>,
    pub uv1: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec4>,
    pub bone_weights: Vec<BoneWeight>,
    pub bind_poses: Vec<Mat4x4>,
    /// Triangle index list per submesh
    pub submeshes: Vec<Vec<i32>>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    /// Whether an optional channel of `len` entries matches the vertex count
    pub fn is_complete_channel(&self, len: usize) -> bool {
        len == self.vertex_count()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.positions)
    }
}
