//! Depth-first scene traversal

use std::io::Write;

use partforge_core::Error;
use partforge_scene::NodeId;
use tracing::trace;

use crate::components::{
    encode_animation, encode_collider, encode_light, encode_mesh_filter, encode_mesh_renderer,
    encode_skinned_mesh_renderer, select_collider,
};
use crate::context::ExportContext;
use crate::error::ExportResult;
use crate::format::EntryType;
use crate::writer::MuWriter;

/// Write `node` and its subtree
///
/// Each child is wrapped in `ChildTransformStart`/`ChildTransformEnd` and
/// the stream is flushed once the child's subtree is complete. Stops with
/// an error once more records are due than the scene has nodes, which only
/// happens when the hierarchy loops back on itself.
pub fn encode_node<W: Write>(
    w: &mut MuWriter<W>,
    ctx: &mut ExportContext<'_>,
    id: NodeId,
) -> ExportResult<()> {
    let scene = ctx.scene;
    if ctx.nodes_written >= scene.node_count() {
        return Err(Error::invalid_data(format!("{id} revisited, node hierarchy is not a tree")).into());
    }
    let node = scene.node(id)?;
    trace!(node = %node.name, id = %id, "Writing node");

    w.write_string(&node.name)?;
    w.write_vec3(node.transform.position)?;
    w.write_quat(node.transform.rotation)?;
    w.write_vec3(node.transform.scale)?;
    // Readers consume 11 floats; the last one repeats scale.x
    w.write_f32(node.transform.scale.x)?;

    w.write_entry(EntryType::TagAndLayer)?;
    w.write_string(&node.tag)?;
    w.write_i32(node.layer)?;

    if let Some(collider) = select_collider(&node.colliders) {
        encode_collider(w, ctx, collider)?;
    }
    encode_mesh_filter(w, ctx, node)?;
    encode_mesh_renderer(w, ctx, node)?;
    if let Some(renderer) = &node.skinned_mesh_renderer {
        encode_skinned_mesh_renderer(w, ctx, renderer)?;
    }
    if let Some(animation) = &node.animation {
        encode_animation(w, animation)?;
    }
    if let Some(light) = &node.light {
        encode_light(w, light)?;
    }
    ctx.nodes_written += 1;

    for &child in &node.children {
        w.write_entry(EntryType::ChildTransformStart)?;
        encode_node(w, ctx, child)?;
        w.write_entry(EntryType::ChildTransformEnd)?;
        w.flush()?;
    }
    Ok(())
}
