//! Texture export
//!
//! After the materials section, every pooled texture is named in the
//! model's textures section. Depending on the export options the source
//! asset is also copied next to the model, or re-encoded as a `.mbm`
//! bitmap. Normal maps flagged for conversion are synthesized from their
//! height data on the way out.

pub mod bitmap;
pub mod normal_map;
pub mod pipeline;

use std::path::PathBuf;

use partforge_scene::TextureKind;
use thiserror::Error;

pub use bitmap::{write_bitmap, BITMAP_EXTENSION};
pub use normal_map::{convert_file, rewrite_in_place, synthesize, ChannelLayout, HeightField};
pub use pipeline::export_textures;

/// Errors raised while copying or re-encoding textures
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Texture source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Texture destination is its own source: {0}")]
    SourceIsDestination(PathBuf),

    #[error("Invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// What happens to texture files during an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureExportMode {
    /// Only the texture name is written
    Reference,
    /// The source file is copied into the output directory
    Copy { rename: bool },
    /// Pixels are re-encoded as a `.mbm` bitmap
    Convert,
}

impl TextureExportMode {
    /// Mode selected by the copy, convert and rename flags. Converting
    /// implies copying; rename only matters for plain copies.
    pub fn from_flags(copy: bool, convert: bool, rename: bool) -> Self {
        match (copy, convert) {
            (false, _) => TextureExportMode::Reference,
            (true, true) => TextureExportMode::Convert,
            (true, false) => TextureExportMode::Copy { rename },
        }
    }
}

/// One entry of the textures section
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedTexture {
    /// Name written into the model file
    pub name: String,
    pub kind: TextureKind,
    /// File written next to the model, if any
    pub destination: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(TextureExportMode::from_flags(false, true, true), TextureExportMode::Reference);
        assert_eq!(TextureExportMode::from_flags(true, true, false), TextureExportMode::Convert);
        assert_eq!(
            TextureExportMode::from_flags(true, false, true),
            TextureExportMode::Copy { rename: true }
        );
    }
}
