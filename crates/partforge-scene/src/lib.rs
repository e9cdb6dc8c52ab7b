//! partforge-scene
//!
//! The in-memory scene model the exporter walks.
//!
//! A [`SceneGraph`] is an arena: nodes, meshes, materials and texture assets
//! live in flat vectors and refer to each other through small copyable
//! handles ([`NodeId`], [`MeshId`], [`MaterialId`], [`TextureId`]). Handle
//! equality is identity: two materials with identical contents added twice
//! are two different materials.
//!
//! # Example
//!
//! ```rust
//! use partforge_scene::{Material, MeshRenderer, SceneGraph, SceneNode};
//!
//! let mut scene = SceneGraph::new();
//! let material = scene.add_material(Material::new("hull", "Diffuse"));
//! let root = scene.add_root(SceneNode::new("part"));
//! let mut hull = SceneNode::new("hull");
//! hull.mesh_renderer = Some(MeshRenderer::new(vec![material]));
//! scene.add_child(root, hull).unwrap();
//!
//! assert_eq!(scene.node_count(), 2);
//! ```

pub mod animation;
pub mod collider;
pub mod description;
pub mod graph;
pub mod light;
pub mod material;
pub mod mesh;
pub mod node;

pub use animation::{
    Animation, AnimationClip, AnimationCurve, AnimationTarget, Keyframe, WrapMode,
};
pub use collider::{
    Collider, ColliderKind, JointSpring, WheelFrictionCurve,
};
pub use description::SceneDescription;
pub use graph::{MaterialId, MeshId, NodeId, SceneGraph, TextureId};
pub use light::{Light, LightType};
pub use material::{ImportSettings, Material, TextureAsset, TextureKind, TextureSlot};
pub use mesh::{BoneWeight, Mesh};
pub use node::{MeshRenderer, SceneNode, SkinQuality, SkinnedMeshRenderer, Transform};
