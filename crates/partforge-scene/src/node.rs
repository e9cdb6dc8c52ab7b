//! Scene nodes and their renderer components

use partforge_core::{Bounds, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::collider::Collider;
use crate::graph::{MaterialId, MeshId, NodeId};
use crate::light::Light;

/// Local transform relative to the parent node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Renderer drawing the node's mesh filter with a list of materials
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshRenderer {
    /// One material per submesh, in submesh order
    pub materials: Vec<MaterialId>,
}

impl MeshRenderer {
    pub fn new(materials: Vec<MaterialId>) -> Self {
        Self { materials }
    }
}

/// Maximum number of bones influencing a skinned vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkinQuality {
    #[default]
    Auto,
    Bone1,
    Bone2,
    Bone4,
}

impl SkinQuality {
    /// Wire value (number of bones, 0 for automatic)
    pub fn code(self) -> i32 {
        match self {
            SkinQuality::Auto => 0,
            SkinQuality::Bone1 => 1,
            SkinQuality::Bone2 => 2,
            SkinQuality::Bone4 => 4,
        }
    }
}

/// Renderer deforming its own mesh with a set of bone nodes
#[derive(Debug, Clone, PartialEq)]
pub struct SkinnedMeshRenderer {
    pub materials: Vec<MaterialId>,
    pub local_bounds: Bounds,
    pub quality: SkinQuality,
    pub update_when_offscreen: bool,
    /// Bone transforms, in the order the mesh's bone weights index them
    pub bones: Vec<NodeId>,
    pub mesh: MeshId,
}

/// A point in the hierarchy with its optional components
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub tag: String,
    pub layer: i32,
    pub children: Vec<NodeId>,
    /// Attached colliders; only one is ever written
    pub colliders: Vec<Collider>,
    /// Mesh filter
    pub mesh: Option<MeshId>,
    pub mesh_renderer: Option<MeshRenderer>,
    pub skinned_mesh_renderer: Option<SkinnedMeshRenderer>,
    pub animation: Option<Animation>,
    pub light: Option<Light>,
}

impl SceneNode {
    /// Default tag given to nodes that were never tagged
    pub const UNTAGGED: &'static str = "Untagged";

    /// Node with an identity transform, untagged, on layer 0, no components
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            tag: Self::UNTAGGED.to_string(),
            layer: 0,
            children: Vec::new(),
            colliders: Vec::new(),
            mesh: None,
            mesh_renderer: None,
            skinned_mesh_renderer: None,
            animation: None,
            light: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>, layer: i32) -> Self {
        self.tag = tag.into();
        self.layer = layer;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
