//! Material payload encoding

use std::io::Write;

use partforge_scene::{Material, TextureId, TextureKind};
use tracing::debug;

use crate::error::ExportResult;
use crate::pool::ResourcePool;
use crate::shader::{MaterialField, ShaderType};
use crate::writer::MuWriter;

/// Texture pool: handle plus the kind declared where it was first bound
pub type TexturePool = ResourcePool<TextureId, TextureKind>;

/// Sentinel written for an unbound texture slot
pub const UNBOUND_TEXTURE: i32 = -1;

/// Write one material: name, shader tag, then the shader's recipe.
/// Bound textures are pooled as they are encountered.
pub fn encode_material<W: Write>(
    w: &mut MuWriter<W>,
    material: &Material,
    textures: &mut TexturePool,
) -> ExportResult<()> {
    let shader = ShaderType::from_shader_name(&material.shader);
    debug!(material = %material.name, shader = %material.shader, tag = ?shader, "Writing material");

    w.write_string(&material.name)?;
    w.write_i32(shader.code())?;

    for field in shader.recipe() {
        match *field {
            MaterialField::Texture { property, kind } => {
                let slot = material.texture_slot(property);
                match slot.texture {
                    Some(texture) => w.write_count(textures.add_or_get_with(texture, kind))?,
                    None => w.write_i32(UNBOUND_TEXTURE)?,
                }
                w.write_vec2(slot.scale)?;
                w.write_vec2(slot.offset)?;
            }
            MaterialField::Color(property) => w.write_color(material.color(property))?,
            MaterialField::Float(property) => w.write_f32(material.float(property))?,
        }
    }
    Ok(())
}
