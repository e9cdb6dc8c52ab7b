//! Traversal properties
//!
//! These tests cover:
//! - Child markers mirroring randomly shaped trees
//! - Collider precedence in written records
//! - Material pool order following traversal order

mod common;

use partforge_core::Vec3;
use partforge_export::walker::encode_node;
use partforge_export::{EntryType, ExportContext, ExportOptions, ExportTarget, MuWriter};
use partforge_scene::{Collider, Material, MeshRenderer, NodeId, SceneGraph, SceneNode};
use proptest::prelude::*;
use proptest::sample::Index;

use common::{count, shape, Reader};

/// Build a tree where node `i + 1` hangs under one of the nodes before it
fn tree_from_parents(parents: &[Index]) -> (SceneGraph, NodeId) {
    let mut scene = SceneGraph::new();
    let root = scene.add_root(SceneNode::new("n0"));
    let mut ids = vec![root];
    for (i, parent) in parents.iter().enumerate() {
        let parent = ids[parent.index(ids.len())];
        let id = scene.add_child(parent, SceneNode::new(format!("n{}", i + 1))).unwrap();
        ids.push(id);
    }
    (scene, root)
}

fn walk(scene: &SceneGraph, root: NodeId) -> (Vec<u8>, usize, usize) {
    let options = ExportOptions::default();
    let target = ExportTarget::new("Tree", "unused", "model");
    let mut ctx = ExportContext::new(scene, &options, &target);
    let mut w = MuWriter::new(Vec::new());
    encode_node(&mut w, &mut ctx, root).unwrap();
    (w.into_inner(), ctx.nodes_written, ctx.materials.len())
}

proptest! {
    #[test]
    fn prop_markers_mirror_tree_shape(parents in prop::collection::vec(any::<Index>(), 0..48)) {
        let (scene, root) = tree_from_parents(&parents);
        let (bytes, nodes, _) = walk(&scene, root);

        let mut reader = Reader::new(&bytes);
        let decoded = reader.node();
        prop_assert!(reader.at_end());
        prop_assert_eq!(&decoded, &shape(&scene, root));
        prop_assert_eq!(count(&decoded), parents.len() + 1);
        prop_assert_eq!(nodes, parents.len() + 1);
    }
}

#[test]
fn test_deep_chain_nests_fully() {
    let mut scene = SceneGraph::new();
    let root = scene.add_root(SceneNode::new("n0"));
    let mut tip = root;
    for i in 1..=30 {
        tip = scene.add_child(tip, SceneNode::new(format!("n{i}"))).unwrap();
    }
    let (bytes, _, _) = walk(&scene, root);

    let mut reader = Reader::new(&bytes);
    reader.node();
    assert_eq!(reader.max_depth, 30);
}

#[test]
fn test_only_highest_precedence_collider_is_written() {
    let mut scene = SceneGraph::new();
    let mut node = SceneNode::new("c");
    node.colliders = vec![
        Collider::Sphere {
            trigger: false,
            radius: 1.0,
            center: Vec3::ZERO,
        },
        Collider::Capsule {
            trigger: false,
            radius: 0.5,
            height: 2.0,
            direction: 1,
            center: Vec3::ZERO,
        },
    ];
    let root = scene.add_root(node);
    let (bytes, _, _) = walk(&scene, root);

    // name(2) + 11 floats + tag entry + "Untagged" + layer
    let at = 2 + 44 + 4 + 9 + 4;
    let tag = i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    assert_eq!(tag, EntryType::CapsuleCollider2.code());
    // capsule: tag, trigger, radius, height, direction, center
    assert_eq!(bytes.len(), at + 4 + 1 + 4 + 4 + 4 + 12);
}

#[test]
fn test_materials_pooled_in_traversal_order() {
    let mut scene = SceneGraph::new();
    let first = scene.add_material(Material::new("first", "Diffuse"));
    let second = scene.add_material(Material::new("second", "Diffuse"));

    let root = scene.add_root(SceneNode::new("root"));
    let mut a = SceneNode::new("a");
    a.mesh_renderer = Some(MeshRenderer::new(vec![second]));
    let a = scene.add_child(root, a).unwrap();
    let mut b = SceneNode::new("b");
    b.mesh_renderer = Some(MeshRenderer::new(vec![first, second]));
    scene.add_child(a, b).unwrap();

    let options = ExportOptions::default();
    let target = ExportTarget::new("Tree", "unused", "model");
    let mut ctx = ExportContext::new(&scene, &options, &target);
    let mut w = MuWriter::new(Vec::new());
    encode_node(&mut w, &mut ctx, root).unwrap();

    assert_eq!(ctx.materials.index_of(second), Some(0));
    assert_eq!(ctx.materials.index_of(first), Some(1));
}
