//! Textures section and per-texture file output

use std::io::Write;
use std::path::PathBuf;

use partforge_scene::{TextureAsset, TextureKind};
use tracing::{debug, warn};

use super::bitmap::{write_bitmap, BITMAP_EXTENSION};
use super::normal_map::rewrite_in_place;
use super::{ExportedTexture, TextureError, TextureExportMode};
use crate::assets::{is_same_file, AssetResolver};
use crate::context::ExportContext;
use crate::error::ExportResult;
use crate::format::EntryType;
use crate::writer::MuWriter;

/// Write the textures section for every pooled texture, copying or
/// converting files as the export options ask
///
/// Writes nothing when no texture was pooled.
pub fn export_textures<W: Write>(
    w: &mut MuWriter<W>,
    ctx: &ExportContext<'_>,
    resolver: &dyn AssetResolver,
) -> ExportResult<Vec<ExportedTexture>> {
    if ctx.textures.is_empty() {
        return Ok(Vec::new());
    }

    let mode = ctx.options.texture_mode();
    w.write_entry(EntryType::Textures)?;
    w.write_count(ctx.textures.len())?;

    let mut exported = Vec::with_capacity(ctx.textures.len());
    for (index, entry) in ctx.textures.iter().enumerate() {
        let texture = ctx.scene.texture(entry.key)?;
        let (name, destination) = export_one(ctx, resolver, mode, index, texture, entry.meta)?;

        w.write_string(&name)?;
        w.write_i32(entry.meta.code())?;
        exported.push(ExportedTexture {
            name,
            kind: entry.meta,
            destination,
        });
    }
    w.flush()?;
    Ok(exported)
}

fn export_one(
    ctx: &ExportContext<'_>,
    resolver: &dyn AssetResolver,
    mode: TextureExportMode,
    index: usize,
    texture: &TextureAsset,
    kind: TextureKind,
) -> ExportResult<(String, Option<PathBuf>)> {
    let base = &ctx.target.base_filename;

    let name = match mode {
        TextureExportMode::Reference => {
            debug!(texture = %texture.name, "Referencing texture");
            return Ok((texture.name.clone(), None));
        }
        TextureExportMode::Convert => format!("{base}{index:03}.{BITMAP_EXTENSION}"),
        TextureExportMode::Copy { rename: true } => {
            format!("{base}{index:03}.{}", texture.source_extension())
        }
        TextureExportMode::Copy { rename: false } => {
            format!("{}.{}", texture.name, texture.source_extension())
        }
    };
    let source = resolver.source_path(texture);
    let dest = ctx.target.output_dir.join(&name);
    debug!(source = %source.display(), dest = %dest.display(), "Texture");

    if mode == TextureExportMode::Convert {
        let image = resolver.load_image(texture)?;
        write_bitmap(&dest, &image, kind, &texture.import)?;
        return Ok((name, Some(dest)));
    }

    let synthesize = kind == TextureKind::NormalMap && texture.import.convert_to_normal_map;
    if is_same_file(&source, &dest) {
        // Rewriting would replace the height data with its own normal map
        if synthesize {
            return Err(TextureError::SourceIsDestination(dest).into());
        }
        debug!(texture = %texture.name, "Texture already in the output directory, not copied");
    } else {
        resolver.copy_asset(texture, &dest)?;
    }

    if synthesize {
        rewrite_in_place(&dest, texture.import.heightmap_scale)?;
    } else if texture.import.convert_to_normal_map {
        warn!(texture = %texture.name, "Texture flagged for normal-map conversion is not bound as a normal map, copied as is");
    }
    Ok((name, Some(dest)))
}
