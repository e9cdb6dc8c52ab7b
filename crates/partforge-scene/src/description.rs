//! JSON scene descriptions
//!
//! A description is the on-disk form of a [`SceneGraph`]: shared resources
//! as flat lists addressed by position, and the node tree nested the way it
//! reads. Bones are referenced by node name and resolved once every node
//! exists.

use std::path::Path;

use partforge_core::{Bounds, Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::Animation;
use crate::collider::Collider;
use crate::graph::{MaterialId, MeshId, NodeId, SceneGraph};
use crate::light::Light;
use crate::material::{Material, TextureAsset};
use crate::mesh::Mesh;
use crate::node::{MeshRenderer, SceneNode, SkinQuality, SkinnedMeshRenderer, Transform};

/// Root document of a scene description file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub textures: Vec<TextureAsset>,
    #[serde(default)]
    pub materials: Vec<Material>,
    pub root: NodeDescription,
}

/// One node of the described tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub layer: i32,
    #[serde(default)]
    pub colliders: Vec<Collider>,
    /// Mesh filter
    #[serde(default)]
    pub mesh: Option<MeshId>,
    /// Materials of the mesh renderer; absent means no renderer
    #[serde(default)]
    pub materials: Option<Vec<MaterialId>>,
    #[serde(default)]
    pub skinned: Option<SkinnedDescription>,
    #[serde(default)]
    pub animation: Option<Animation>,
    #[serde(default)]
    pub light: Option<Light>,
    #[serde(default)]
    pub children: Vec<NodeDescription>,
}

/// Skinned mesh renderer with bones named instead of indexed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinnedDescription {
    pub mesh: MeshId,
    #[serde(default)]
    pub materials: Vec<MaterialId>,
    /// Defaults to the bounds of the mesh positions
    #[serde(default)]
    pub local_bounds: Option<Bounds>,
    #[serde(default)]
    pub quality: SkinQuality,
    #[serde(default)]
    pub update_when_offscreen: bool,
    #[serde(default)]
    pub bones: Vec<String>,
}

fn default_tag() -> String {
    SceneNode::UNTAGGED.to_string()
}

impl SceneDescription {
    /// Parse a description from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a description file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Build and validate the scene, returning it with its root node
    pub fn build(self) -> Result<(SceneGraph, NodeId)> {
        let mut scene = SceneGraph::new();
        for mesh in self.meshes {
            scene.add_mesh(mesh);
        }
        for texture in self.textures {
            scene.add_texture(texture);
        }
        for material in self.materials {
            scene.add_material(material);
        }

        let mut pending_bones = Vec::new();
        let root = add_subtree(&mut scene, None, self.root, &mut pending_bones)?;

        for (owner, names) in pending_bones {
            let mut bones = Vec::with_capacity(names.len());
            for name in names {
                let bone = scene
                    .find_by_name(&name)
                    .ok_or_else(|| Error::NodeNotFound { name: name.clone() })?;
                bones.push(bone);
            }
            if let Some(skinned) = scene.node_mut(owner)?.skinned_mesh_renderer.as_mut() {
                skinned.bones = bones;
            }
        }

        scene.validate()?;
        debug!(nodes = scene.node_count(), "Scene description built");
        Ok((scene, root))
    }
}

fn add_subtree(
    scene: &mut SceneGraph,
    parent: Option<NodeId>,
    desc: NodeDescription,
    pending_bones: &mut Vec<(NodeId, Vec<String>)>,
) -> Result<NodeId> {
    let mut node = SceneNode::new(desc.name)
        .with_transform(desc.transform)
        .with_tag(desc.tag, desc.layer);
    node.colliders = desc.colliders;
    node.mesh = desc.mesh;
    node.mesh_renderer = desc.materials.map(MeshRenderer::new);
    node.animation = desc.animation;
    node.light = desc.light;

    let mut bone_names = None;
    if let Some(skinned) = desc.skinned {
        let local_bounds = match skinned.local_bounds {
            Some(bounds) => bounds,
            None => scene.mesh(skinned.mesh)?.bounds(),
        };
        node.skinned_mesh_renderer = Some(SkinnedMeshRenderer {
            materials: skinned.materials,
            local_bounds,
            quality: skinned.quality,
            update_when_offscreen: skinned.update_when_offscreen,
            bones: Vec::new(),
            mesh: skinned.mesh,
        });
        bone_names = Some(skinned.bones);
    }

    let id = match parent {
        Some(parent) => scene.add_child(parent, node)?,
        None => scene.add_root(node),
    };
    if let Some(names) = bone_names {
        pending_bones.push((id, names));
    }

    for child in desc.children {
        add_subtree(scene, Some(id), child, pending_bones)?;
    }
    Ok(id)
}
