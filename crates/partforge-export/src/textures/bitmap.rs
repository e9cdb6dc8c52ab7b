//! `.mbm` bitmap writer
//!
//! Layout: the string `"KSP"`, width, height, texture kind and bit depth
//! as `i32`, then pixels bottom row first with one byte per channel.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use partforge_scene::{ImportSettings, TextureKind};

use super::normal_map::{synthesize, ChannelLayout, HeightField};
use super::TextureResult;
use crate::writer::MuWriter;

/// Extension of converted textures
pub const BITMAP_EXTENSION: &str = "mbm";

/// Factor applied to the import height scale before bitmap synthesis
pub const BITMAP_STRENGTH_FACTOR: f32 = 0.001;

const BITMAP_MAGIC: &str = "KSP";

/// Encode `image` as a bitmap file at `path`
pub fn write_bitmap(
    path: &Path,
    image: &DynamicImage,
    kind: TextureKind,
    import: &ImportSettings,
) -> TextureResult<u64> {
    let file = File::create(path)?;
    let mut w = MuWriter::new(BufWriter::new(file));
    encode_bitmap(&mut w, image, kind, import)?;
    w.flush()?;
    Ok(w.bytes_written())
}

/// Encode `image` into `w`
///
/// Plain textures keep alpha only when the source has it. Normal maps are
/// always 32-bit and are synthesized from height data when their import
/// settings ask for it.
pub fn encode_bitmap<W: Write>(
    w: &mut MuWriter<W>,
    image: &DynamicImage,
    kind: TextureKind,
    import: &ImportSettings,
) -> TextureResult<()> {
    let (pixels, alpha): (RgbaImage, bool) = match kind {
        TextureKind::Texture => (image.to_rgba8(), image.color().has_alpha()),
        TextureKind::NormalMap if import.convert_to_normal_map => {
            let field = HeightField::from_image(image)?;
            let strength = import.heightmap_scale * BITMAP_STRENGTH_FACTOR;
            (synthesize(&field, strength, ChannelLayout::PackedAlpha), true)
        }
        TextureKind::NormalMap => (image.to_rgba8(), true),
    };
    let (width, height) = pixels.dimensions();

    w.write_string(BITMAP_MAGIC)?;
    w.write_count(width as usize)?;
    w.write_count(height as usize)?;
    w.write_i32(kind.code())?;
    w.write_i32(if alpha { 32 } else { 24 })?;

    for row in (0..height).rev() {
        for x in 0..width {
            let [r, g, b, a] = pixels.get_pixel(x, row).0;
            w.write_bytes(&[r, g, b])?;
            if alpha {
                w.write_u8(a)?;
            }
        }
        w.flush()?;
    }
    Ok(())
}
