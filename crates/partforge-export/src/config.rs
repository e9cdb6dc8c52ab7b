//! Part definition files
//!
//! A part definition (`*.part.json`) names a scene description and says
//! where and how to export it. Every field has a default, so `{}` is a
//! valid definition. Relative paths resolve against the directory holding
//! the definition.

use std::fs;
use std::path::{Path, PathBuf};

use partforge_core::{Error, Result, ResultExt};
use partforge_scene::SceneDescription;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::FsAssetResolver;
use crate::error::ExportResult;
use crate::exporter::{ExportOptions, ExportReport, ExportTarget, PartWriter};
use crate::format::MODEL_EXTENSION;

/// Suffix identifying part definition files
pub const PART_DEFINITION_SUFFIX: &str = ".part.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartDefinition {
    pub model_name: String,
    /// Output directory
    pub file_path: PathBuf,
    /// Model file stem
    pub filename: String,
    pub copy_textures: bool,
    pub auto_rename_textures: bool,
    pub convert_textures: bool,
    /// Scene description to export
    pub scene: PathBuf,
    /// Root for relative texture sources, the definition's directory if unset
    pub asset_root: Option<PathBuf>,
    pub file_extension: String,
}

impl Default for PartDefinition {
    fn default() -> Self {
        Self {
            model_name: "NewModel".to_string(),
            file_path: PathBuf::from("Parts/NewPart/"),
            filename: "model".to_string(),
            copy_textures: true,
            auto_rename_textures: true,
            convert_textures: true,
            scene: PathBuf::from("scene.json"),
            asset_root: None,
            file_extension: MODEL_EXTENSION.to_string(),
        }
    }
}

impl PartDefinition {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            file_extension: self.file_extension.clone(),
            copy_textures: self.copy_textures,
            convert_textures: self.convert_textures,
            rename_textures: self.auto_rename_textures,
        }
    }

    pub fn target(&self, definition_dir: &Path) -> ExportTarget {
        ExportTarget::new(
            self.model_name.clone(),
            definition_dir.join(&self.file_path),
            self.filename.clone(),
        )
    }

    /// Load the scene and export it, resolving paths against `definition_dir`
    pub fn export(&self, definition_dir: &Path) -> ExportResult<ExportReport> {
        let scene_path = definition_dir.join(&self.scene);
        let (scene, root) = SceneDescription::load(&scene_path)?.build()?;

        let asset_root = match &self.asset_root {
            Some(root) => definition_dir.join(root),
            None => definition_dir.to_path_buf(),
        };
        let writer = PartWriter::with_resolver(self.options(), FsAssetResolver::new(asset_root));
        writer.export(&scene, root, &self.target(definition_dir))
    }
}

/// All part definitions under `dir`, recursively, in path order
pub fn discover_part_definitions(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_definitions(dir, &mut found).with_context(|| format!("scanning {}", dir.display()))?;
    found.sort();
    debug!(dir = %dir.display(), count = found.len(), "Discovered part definitions");
    Ok(found)
}

fn collect_definitions(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_definitions(&path, found)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(PART_DEFINITION_SUFFIX))
        {
            found.push(path);
        }
    }
    Ok(())
}
