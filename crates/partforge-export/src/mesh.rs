//! Mesh block encoding

use std::io::{self, Write};

use partforge_scene::Mesh;

use crate::format::EntryType;
use crate::writer::MuWriter;

/// Write a complete mesh block, `MeshStart` through `MeshEnd`
///
/// Optional per-vertex channels are skipped unless they hold exactly one
/// entry per vertex, so a mesh without vertices carries every channel tag
/// with no payload. Bind poses are written whenever there are any.
pub fn encode_mesh<W: Write>(w: &mut MuWriter<W>, mesh: &Mesh) -> io::Result<()> {
    w.write_entry(EntryType::MeshStart)?;
    w.write_count(mesh.vertex_count())?;
    w.write_count(mesh.submesh_count())?;

    w.write_entry(EntryType::MeshVerts)?;
    for &p in &mesh.positions {
        w.write_vec3(p)?;
    }

    if mesh.is_complete_channel(mesh.uv0.len()) {
        w.write_entry(EntryType::MeshUV)?;
        for &uv in &mesh.uv0 {
            w.write_vec2(uv)?;
        }
    }

    if mesh.is_complete_channel(mesh.uv1.len()) {
        w.write_entry(EntryType::MeshUV2)?;
        for &uv in &mesh.uv1 {
            w.write_vec2(uv)?;
        }
    }

    if mesh.is_complete_channel(mesh.normals.len()) {
        w.write_entry(EntryType::MeshNormals)?;
        for &n in &mesh.normals {
            w.write_vec3(n)?;
        }
    }

    if mesh.is_complete_channel(mesh.tangents.len()) {
        w.write_entry(EntryType::MeshTangents)?;
        for &t in &mesh.tangents {
            w.write_vec4(t)?;
        }
    }

    if mesh.is_complete_channel(mesh.bone_weights.len()) {
        w.write_entry(EntryType::MeshBoneWeights)?;
        for weight in &mesh.bone_weights {
            for (index, value) in weight.indices.iter().zip(weight.weights) {
                w.write_i32(*index)?;
                w.write_f32(value)?;
            }
        }
    }

    if !mesh.bind_poses.is_empty() {
        w.write_entry(EntryType::MeshBindPoses)?;
        w.write_count(mesh.bind_poses.len())?;
        for pose in &mesh.bind_poses {
            w.write_matrix(pose)?;
        }
    }

    for triangles in &mesh.submeshes {
        w.write_entry(EntryType::MeshTriangles)?;
        w.write_count(triangles.len())?;
        for &index in triangles {
            w.write_i32(index)?;
        }
    }

    w.write_entry(EntryType::MeshEnd)
}
