//! Per-export state

use partforge_scene::{MaterialId, SceneGraph};

use crate::exporter::{ExportOptions, ExportTarget};
use crate::material::TexturePool;
use crate::pool::ResourcePool;

/// Everything one export call mutates while it walks the scene
///
/// Created fresh by [`crate::PartWriter::export`] and dropped when it
/// returns, so two exports never observe each other's pools.
pub struct ExportContext<'a> {
    pub scene: &'a SceneGraph,
    pub options: &'a ExportOptions,
    pub target: &'a ExportTarget,
    pub materials: ResourcePool<MaterialId>,
    pub textures: TexturePool,
    /// Nodes whose records have been written so far
    pub nodes_written: usize,
}

impl<'a> ExportContext<'a> {
    pub fn new(scene: &'a SceneGraph, options: &'a ExportOptions, target: &'a ExportTarget) -> Self {
        Self {
            scene,
            options,
            target,
            materials: ResourcePool::new(),
            textures: TexturePool::new(),
            nodes_written: 0,
        }
    }

    /// Pool index of `material`, pooling it on first use
    pub fn material_index(&mut self, material: MaterialId) -> usize {
        self.materials.add_or_get(material)
    }
}
