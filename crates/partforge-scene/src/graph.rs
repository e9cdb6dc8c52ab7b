//! Arena storage for a scene

use partforge_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::material::{Material, TextureAsset};
use crate::mesh::Mesh;
use crate::node::SceneNode;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Arena slot of this handle
            pub fn index(self) -> usize {
                self.0
            }

            const KIND: &'static str = $kind;
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", $kind, self.0)
            }
        }
    };
}

define_handle!(
    /// Handle to a node in a [`SceneGraph`]
    NodeId, "node"
);
define_handle!(
    /// Handle to a shared mesh
    MeshId, "mesh"
);
define_handle!(
    /// Handle to a material instance
    MaterialId, "material"
);
define_handle!(
    /// Handle to a texture asset
    TextureId, "texture"
);

/// A scene: node tree plus the shared resources its components reference
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    textures: Vec<TextureAsset>,
}

impl SceneGraph {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without a parent
    pub fn add_root(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Add a node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId> {
        self.check(parent, self.nodes.len())?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Register a mesh
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// Register a material instance
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Register a texture asset
    pub fn add_texture(&mut self, texture: TextureAsset) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| Error::invalid_reference(NodeId::KIND, id.0, self.nodes.len()))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| Error::invalid_reference(NodeId::KIND, id.0, len))
    }

    pub fn mesh(&self, id: MeshId) -> Result<&Mesh> {
        self.meshes
            .get(id.0)
            .ok_or_else(|| Error::invalid_reference(MeshId::KIND, id.0, self.meshes.len()))
    }

    pub fn material(&self, id: MaterialId) -> Result<&Material> {
        self.materials
            .get(id.0)
            .ok_or_else(|| Error::invalid_reference(MaterialId::KIND, id.0, self.materials.len()))
    }

    pub fn texture(&self, id: TextureId) -> Result<&TextureAsset> {
        self.textures
            .get(id.0)
            .ok_or_else(|| Error::invalid_reference(TextureId::KIND, id.0, self.textures.len()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node carrying `name`, in insertion order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Number of nodes in the subtree rooted at `root`, root included
    pub fn subtree_len(&self, root: NodeId) -> Result<usize> {
        let mut count = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            count += 1;
            stack.extend(self.node(id)?.children.iter().copied());
        }
        Ok(count)
    }

    /// Check that every handle stored in nodes and materials resolves and
    /// that the nodes form a forest
    pub fn validate(&self) -> Result<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            let context = || format!("node #{index} '{}'", node.name);
            self.validate_node(node).map_err(|e| e.with_context(context()))?;
        }
        self.validate_hierarchy()?;
        for material in &self.materials {
            for slot in material.textures.values() {
                if let Some(texture) = slot.texture {
                    self.texture(texture)
                        .map_err(|e| e.with_context(format!("material '{}'", material.name)))?;
                }
            }
        }
        Ok(())
    }

    /// Check that every node has at most one parent and that no node is
    /// its own ancestor
    ///
    /// Child handles that do not resolve are reported as invalid references.
    pub fn validate_hierarchy(&self) -> Result<()> {
        let len = self.nodes.len();
        let mut parents: Vec<Option<usize>> = vec![None; len];
        for (index, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                self.check(child, len)?;
                if let Some(first) = parents[child.0] {
                    return Err(Error::invalid_data(format!(
                        "node #{} '{}' is a child of both node #{first} and node #{index}",
                        child.0, self.nodes[child.0].name
                    )));
                }
                parents[child.0] = Some(index);
            }
        }

        // With single parents, anything not reachable from a parentless
        // node sits on a cycle
        let mut reached = vec![false; len];
        let mut stack: Vec<usize> = (0..len).filter(|&i| parents[i].is_none()).collect();
        while let Some(index) = stack.pop() {
            reached[index] = true;
            stack.extend(self.nodes[index].children.iter().map(|c| c.0));
        }
        match reached.iter().position(|&r| !r) {
            Some(index) => Err(Error::invalid_data(format!(
                "node #{index} '{}' is its own ancestor",
                self.nodes[index].name
            ))),
            None => Ok(()),
        }
    }

    fn validate_node(&self, node: &SceneNode) -> Result<()> {
        for &child in &node.children {
            self.node(child)?;
        }
        for collider in &node.colliders {
            if let crate::collider::Collider::Mesh { mesh, .. } = collider {
                self.mesh(*mesh)?;
            }
        }
        if let Some(mesh) = node.mesh {
            self.mesh(mesh)?;
        }
        if let Some(renderer) = &node.mesh_renderer {
            for &material in &renderer.materials {
                self.material(material)?;
            }
        }
        if let Some(skinned) = &node.skinned_mesh_renderer {
            for &material in &skinned.materials {
                self.material(material)?;
            }
            for &bone in &skinned.bones {
                self.node(bone)?;
            }
            self.mesh(skinned.mesh)?;
        }
        Ok(())
    }

    fn check(&self, id: NodeId, len: usize) -> Result<()> {
        if id.0 < len {
            Ok(())
        } else {
            Err(Error::invalid_reference(NodeId::KIND, id.0, len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_keep_insertion_order() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(SceneNode::new("root"));
        let a = scene.add_child(root, SceneNode::new("a")).unwrap();
        let b = scene.add_child(root, SceneNode::new("b")).unwrap();
        scene.add_child(a, SceneNode::new("a1")).unwrap();

        assert_eq!(scene.node(root).unwrap().children, vec![a, b]);
        assert_eq!(scene.subtree_len(root).unwrap(), 4);
        assert_eq!(scene.subtree_len(b).unwrap(), 1);
    }

    #[test]
    fn test_add_child_to_missing_parent_fails() {
        let mut scene = SceneGraph::new();
        let err = scene.add_child(NodeId(3), SceneNode::new("orphan")).unwrap_err();
        assert!(matches!(err, Error::InvalidReference { kind: "node", index: 3, len: 0 }));
    }

    #[test]
    fn test_identical_materials_get_distinct_handles() {
        let mut scene = SceneGraph::new();
        let a = scene.add_material(Material::new("paint", "Diffuse"));
        let b = scene.add_material(Material::new("paint", "Diffuse"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_validate_reports_dangling_material() {
        let mut scene = SceneGraph::new();
        let mut node = SceneNode::new("panel");
        node.mesh_renderer = Some(crate::node::MeshRenderer::new(vec![MaterialId(7)]));
        scene.add_root(node);

        let err = scene.validate().unwrap_err();
        assert!(err.to_string().contains("panel"));
        assert!(err.to_string().contains("material #7"));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(SceneNode::new("root"));
        let child = scene.add_child(root, SceneNode::new("c")).unwrap();
        scene.node_mut(child).unwrap().children.push(root);

        let err = scene.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidData { .. }));
        assert!(err.to_string().contains("own ancestor"));
    }

    #[test]
    fn test_validate_rejects_self_parent() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(SceneNode::new("root"));
        scene.add_root(SceneNode::new("other"));
        scene.node_mut(root).unwrap().children.push(root);

        assert!(scene.validate_hierarchy().is_err());
    }

    #[test]
    fn test_validate_rejects_shared_child() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(SceneNode::new("root"));
        let a = scene.add_child(root, SceneNode::new("a")).unwrap();
        let shared = scene.add_child(a, SceneNode::new("shared")).unwrap();
        scene.node_mut(root).unwrap().children.push(shared);

        let err = scene.validate_hierarchy().unwrap_err();
        assert!(err.to_string().contains("'shared' is a child of both node #0 and node #1"));
    }

    #[test]
    fn test_forest_passes_hierarchy_check() {
        let mut scene = SceneGraph::new();
        let a = scene.add_root(SceneNode::new("a"));
        let b = scene.add_root(SceneNode::new("b"));
        scene.add_child(a, SceneNode::new("a1")).unwrap();
        scene.add_child(b, SceneNode::new("b1")).unwrap();
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_find_by_name() {
        let mut scene = SceneGraph::new();
        let root = scene.add_root(SceneNode::new("root"));
        let bone = scene.add_child(root, SceneNode::new("bone")).unwrap();
        assert_eq!(scene.find_by_name("bone"), Some(bone));
        assert_eq!(scene.find_by_name("missing"), None);
    }
}
