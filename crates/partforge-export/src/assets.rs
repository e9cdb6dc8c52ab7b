//! Texture asset access

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use partforge_scene::TextureAsset;

use crate::textures::{TextureError, TextureResult};

/// Maps texture assets to files on disk
///
/// The default methods read and copy through the local file system;
/// implementors usually only decide where a texture's source lives.
pub trait AssetResolver: Send + Sync {
    fn source_path(&self, texture: &TextureAsset) -> PathBuf;

    fn load_image(&self, texture: &TextureAsset) -> TextureResult<DynamicImage> {
        let path = self.existing_source(texture)?;
        Ok(image::open(path)?)
    }

    /// Copy the source file verbatim to `dest`, returning the bytes copied
    ///
    /// Refuses to copy a file onto itself, which would truncate it.
    fn copy_asset(&self, texture: &TextureAsset, dest: &Path) -> TextureResult<u64> {
        let path = self.existing_source(texture)?;
        if is_same_file(&path, dest) {
            return Err(TextureError::SourceIsDestination(dest.to_path_buf()));
        }
        Ok(fs::copy(path, dest)?)
    }

    fn existing_source(&self, texture: &TextureAsset) -> TextureResult<PathBuf> {
        let path = self.source_path(texture);
        if !path.is_file() {
            return Err(TextureError::SourceNotFound(path));
        }
        Ok(path)
    }
}

/// Whether both paths name the same existing file
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Resolves relative texture sources against a root directory
#[derive(Debug, Clone, Default)]
pub struct FsAssetResolver {
    root: PathBuf,
}

impl FsAssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for FsAssetResolver {
    fn source_path(&self, texture: &TextureAsset) -> PathBuf {
        if texture.source.is_absolute() {
            texture.source.clone()
        } else {
            self.root.join(&texture.source)
        }
    }
}
