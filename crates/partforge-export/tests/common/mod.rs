//! Shared helpers for the export integration tests

#![allow(dead_code)]

use partforge_core::Vec2;
use partforge_export::{EntryType, MuWriter};
use partforge_scene::{Material, NodeId, SceneGraph, SceneNode, TextureAsset, TextureSlot};

/// Node shape recovered from a model file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedNode {
    pub name: String,
    pub children: Vec<DecodedNode>,
}

/// Minimal reader for models whose nodes carry no components
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Deepest marker nesting seen
    pub max_depth: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            max_depth: 0,
            depth: 0,
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    pub fn i32(&mut self) -> i32 {
        let b = &self.bytes[self.pos..self.pos + 4];
        self.pos += 4;
        i32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    pub fn f32(&mut self) -> f32 {
        f32::from_bits(self.i32() as u32)
    }

    pub fn peek_i32(&self) -> Option<i32> {
        let b = self.bytes.get(self.pos..self.pos + 4)?;
        Some(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn string(&mut self) -> String {
        let mut len = 0usize;
        let mut shift = 0;
        loop {
            let byte = self.bytes[self.pos];
            self.pos += 1;
            len |= usize::from(byte & 0x7F) << shift;
            shift += 7;
            if byte & 0x80 == 0 {
                break;
            }
        }
        let text = std::str::from_utf8(&self.bytes[self.pos..self.pos + len]).unwrap().to_string();
        self.pos += len;
        text
    }

    /// Header fields: magic, version, model name
    pub fn header(&mut self) -> (i32, i32, String) {
        (self.i32(), self.i32(), self.string())
    }

    /// One node record and its children, panicking on unbalanced markers
    pub fn node(&mut self) -> DecodedNode {
        let name = self.string();
        for _ in 0..11 {
            self.f32();
        }
        assert_eq!(self.i32(), EntryType::TagAndLayer.code());
        self.string();
        self.i32();

        let mut children = Vec::new();
        while self.peek_i32() == Some(EntryType::ChildTransformStart.code()) {
            self.i32();
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
            children.push(self.node());
            assert_eq!(self.i32(), EntryType::ChildTransformEnd.code(), "unbalanced child markers");
            self.depth -= 1;
        }
        DecodedNode { name, children }
    }
}

/// Shape of the subtree under `id`
pub fn shape(scene: &SceneGraph, id: NodeId) -> DecodedNode {
    let node = scene.node(id).unwrap();
    DecodedNode {
        name: node.name.clone(),
        children: node.children.iter().map(|&c| shape(scene, c)).collect(),
    }
}

pub fn count(node: &DecodedNode) -> usize {
    1 + node.children.iter().map(count).sum::<usize>()
}

/// Bytes produced by `f` writing into a fresh in-memory writer
pub fn bytes_of(f: impl FnOnce(&mut MuWriter<Vec<u8>>)) -> Vec<u8> {
    let mut w = MuWriter::new(Vec::new());
    f(&mut w);
    w.into_inner()
}

/// Identity transform record followed by the default tag and layer
pub fn write_plain_node(w: &mut MuWriter<Vec<u8>>, name: &str) {
    w.write_string(name).unwrap();
    for v in [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0] {
        w.write_f32(v).unwrap();
    }
    w.write_entry(EntryType::TagAndLayer).unwrap();
    w.write_string(SceneNode::UNTAGGED).unwrap();
    w.write_i32(0).unwrap();
}

/// Scene with one root rendering a trivial mesh with material `M`, whose
/// main texture is `T` sourced from `T.png`
pub fn single_material_scene() -> (SceneGraph, NodeId) {
    let mut scene = SceneGraph::new();
    let texture = scene.add_texture(TextureAsset::new("T", "T.png"));
    let material = scene.add_material(
        Material::new("M", "Diffuse").with_texture("_MainTex", TextureSlot::bound(texture)),
    );
    let mesh = scene.add_mesh(partforge_scene::Mesh::new("trivial"));

    let mut root = SceneNode::new("root");
    root.mesh = Some(mesh);
    root.mesh_renderer = Some(partforge_scene::MeshRenderer::new(vec![material]));
    let root = scene.add_root(root);
    (scene, root)
}

pub fn write_uv_transform(w: &mut MuWriter<Vec<u8>>, scale: Vec2, offset: Vec2) {
    w.write_vec2(scale).unwrap();
    w.write_vec2(offset).unwrap();
}

pub fn gray_png(path: &std::path::Path, size: u32, value: u8) {
    image::RgbImage::from_pixel(size, size, image::Rgb([value, value, value]))
        .save(path)
        .unwrap();
}
