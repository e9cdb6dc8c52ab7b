//! Per-node component records

use std::io::Write;

use partforge_scene::{
    Animation, AnimationClip, Collider, Light, MaterialId, SceneNode, SkinnedMeshRenderer,
    WheelFrictionCurve,
};

use crate::context::ExportContext;
use crate::error::ExportResult;
use crate::format::EntryType;
use crate::mesh::encode_mesh;
use crate::writer::MuWriter;

/// The one collider written for a node: highest precedence kind, first
/// attached on ties
pub fn select_collider(colliders: &[Collider]) -> Option<&Collider> {
    colliders.iter().min_by_key(|c| c.kind())
}

pub fn encode_collider<W: Write>(
    w: &mut MuWriter<W>,
    ctx: &ExportContext<'_>,
    collider: &Collider,
) -> ExportResult<()> {
    match collider {
        Collider::Mesh {
            trigger,
            convex,
            mesh,
        } => {
            w.write_entry(EntryType::MeshCollider2)?;
            w.write_bool(*trigger)?;
            w.write_bool(*convex)?;
            encode_mesh(w, ctx.scene.mesh(*mesh)?)?;
        }
        Collider::Box {
            trigger,
            size,
            center,
        } => {
            w.write_entry(EntryType::BoxCollider2)?;
            w.write_bool(*trigger)?;
            w.write_vec3(*size)?;
            w.write_vec3(*center)?;
        }
        Collider::Capsule {
            trigger,
            radius,
            height,
            direction,
            center,
        } => {
            w.write_entry(EntryType::CapsuleCollider2)?;
            w.write_bool(*trigger)?;
            w.write_f32(*radius)?;
            w.write_f32(*height)?;
            w.write_i32(*direction)?;
            w.write_vec3(*center)?;
        }
        Collider::Sphere {
            trigger,
            radius,
            center,
        } => {
            w.write_entry(EntryType::SphereCollider2)?;
            w.write_bool(*trigger)?;
            w.write_f32(*radius)?;
            w.write_vec3(*center)?;
        }
        Collider::Wheel {
            mass,
            radius,
            suspension_distance,
            center,
            suspension_spring,
            forward_friction,
            sideways_friction,
        } => {
            w.write_entry(EntryType::WheelCollider)?;
            w.write_f32(*mass)?;
            w.write_f32(*radius)?;
            w.write_f32(*suspension_distance)?;
            w.write_vec3(*center)?;
            w.write_f32(suspension_spring.spring)?;
            w.write_f32(suspension_spring.damper)?;
            w.write_f32(suspension_spring.target_position)?;
            write_friction(w, forward_friction)?;
            write_friction(w, sideways_friction)?;
        }
    }
    Ok(())
}

fn write_friction<W: Write>(w: &mut MuWriter<W>, curve: &WheelFrictionCurve) -> std::io::Result<()> {
    w.write_f32(curve.extremum_slip)?;
    w.write_f32(curve.extremum_value)?;
    w.write_f32(curve.asymptote_slip)?;
    w.write_f32(curve.asymptote_value)?;
    w.write_f32(curve.stiffness)
}

/// Material count followed by each material's pool index
fn write_material_indices<W: Write>(
    w: &mut MuWriter<W>,
    ctx: &mut ExportContext<'_>,
    materials: &[MaterialId],
) -> ExportResult<()> {
    w.write_count(materials.len())?;
    for &material in materials {
        // Resolve first so a dangling handle never reaches the pool
        ctx.scene.material(material)?;
        let index = ctx.material_index(material);
        w.write_count(index)?;
    }
    Ok(())
}

pub fn encode_mesh_filter<W: Write>(
    w: &mut MuWriter<W>,
    ctx: &ExportContext<'_>,
    node: &SceneNode,
) -> ExportResult<()> {
    if let Some(mesh) = node.mesh {
        w.write_entry(EntryType::MeshFilter)?;
        encode_mesh(w, ctx.scene.mesh(mesh)?)?;
    }
    Ok(())
}

pub fn encode_mesh_renderer<W: Write>(
    w: &mut MuWriter<W>,
    ctx: &mut ExportContext<'_>,
    node: &SceneNode,
) -> ExportResult<()> {
    if let Some(renderer) = &node.mesh_renderer {
        w.write_entry(EntryType::MeshRenderer)?;
        write_material_indices(w, ctx, &renderer.materials)?;
    }
    Ok(())
}

pub fn encode_skinned_mesh_renderer<W: Write>(
    w: &mut MuWriter<W>,
    ctx: &mut ExportContext<'_>,
    renderer: &SkinnedMeshRenderer,
) -> ExportResult<()> {
    w.write_entry(EntryType::SkinnedMeshRenderer)?;
    write_material_indices(w, ctx, &renderer.materials)?;
    w.write_vec3(renderer.local_bounds.center)?;
    w.write_vec3(renderer.local_bounds.size)?;
    w.write_i32(renderer.quality.code())?;
    w.write_bool(renderer.update_when_offscreen)?;
    w.write_count(renderer.bones.len())?;
    for &bone in &renderer.bones {
        w.write_string(&ctx.scene.node(bone)?.name)?;
    }
    encode_mesh(w, ctx.scene.mesh(renderer.mesh)?)?;
    Ok(())
}

/// Animation record; nothing is written for a component without clips
pub fn encode_animation<W: Write>(w: &mut MuWriter<W>, animation: &Animation) -> ExportResult<()> {
    if !animation.has_clips() {
        return Ok(());
    }

    w.write_entry(EntryType::Animation)?;
    w.write_count(animation.clips.len())?;
    for clip in &animation.clips {
        write_clip(w, clip)?;
    }
    w.write_string(animation.default_clip.as_deref().unwrap_or(""))?;
    w.write_bool(animation.play_automatically)?;
    Ok(())
}

fn write_clip<W: Write>(w: &mut MuWriter<W>, clip: &AnimationClip) -> std::io::Result<()> {
    w.write_string(&clip.name)?;
    w.write_vec3(clip.local_bounds.center)?;
    w.write_vec3(clip.local_bounds.size)?;
    w.write_i32(clip.wrap_mode.code())?;
    w.write_count(clip.curves.len())?;
    for curve in &clip.curves {
        w.write_string(&curve.path)?;
        w.write_string(&curve.property)?;
        w.write_i32(curve.target.code())?;
        w.write_i32(curve.pre_wrap.code())?;
        w.write_i32(curve.post_wrap.code())?;
        w.write_count(curve.keys.len())?;
        for key in &curve.keys {
            w.write_f32(key.time)?;
            w.write_f32(key.value)?;
            w.write_f32(key.in_tangent)?;
            w.write_f32(key.out_tangent)?;
            w.write_i32(key.tangent_mode)?;
        }
    }
    Ok(())
}

pub fn encode_light<W: Write>(w: &mut MuWriter<W>, light: &Light) -> ExportResult<()> {
    w.write_entry(EntryType::Light)?;
    w.write_i32(light.light_type.code())?;
    w.write_f32(light.intensity)?;
    w.write_f32(light.range)?;
    w.write_color(light.color)?;
    w.write_i32(light.culling_mask)?;
    Ok(())
}
