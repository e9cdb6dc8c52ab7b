//! Model export entry points

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use partforge_scene::{NodeId, SceneGraph};

use crate::assets::{AssetResolver, FsAssetResolver};
use crate::context::ExportContext;
use crate::error::{ExportError, ExportResult};
use crate::format::{EntryType, FORMAT_VERSION, MODEL_BINARY_MAGIC, MODEL_EXTENSION};
use crate::material::encode_material;
use crate::textures::{export_textures, ExportedTexture, TextureExportMode};
use crate::walker::encode_node;
use crate::writer::MuWriter;
use crate::{log_export_complete, log_export_error, log_export_start};

/// Options that stay fixed across exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Extension of the model file, including the dot
    pub file_extension: String,
    pub copy_textures: bool,
    pub convert_textures: bool,
    pub rename_textures: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_extension: MODEL_EXTENSION.to_string(),
            copy_textures: false,
            convert_textures: false,
            rename_textures: false,
        }
    }
}

impl ExportOptions {
    pub fn texture_mode(&self) -> TextureExportMode {
        TextureExportMode::from_flags(self.copy_textures, self.convert_textures, self.rename_textures)
    }
}

/// Where one model goes and what it is called
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub model_name: String,
    pub output_dir: PathBuf,
    /// File stem of the model; also prefixes renamed textures
    pub base_filename: String,
}

impl ExportTarget {
    pub fn new(
        model_name: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        base_filename: impl Into<String>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            output_dir: output_dir.into(),
            base_filename: base_filename.into(),
        }
    }

    pub fn output_path(&self, extension: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", self.base_filename, extension))
    }
}

/// Summary of a completed export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub nodes: usize,
    pub materials: usize,
    pub textures: Vec<ExportedTexture>,
    pub bytes_written: u64,
}

/// Writes scenes as `.mu` model files
///
/// Holds only immutable configuration, so one writer can serve any number
/// of concurrent exports.
#[derive(Debug, Clone, Default)]
pub struct PartWriter<R = FsAssetResolver> {
    options: ExportOptions,
    resolver: R,
}

impl PartWriter<FsAssetResolver> {
    /// Writer resolving relative texture sources against the working directory
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            resolver: FsAssetResolver::default(),
        }
    }
}

impl<R: AssetResolver> PartWriter<R> {
    pub fn with_resolver(options: ExportOptions, resolver: R) -> Self {
        Self { options, resolver }
    }

    /// Export the subtree under `root` to `target`
    ///
    /// A node hierarchy with cycles or shared children fails with
    /// [`ExportError::Scene`] and nothing is created. Fails with
    /// [`ExportError::CreateOutput`] before writing anything if the
    /// directory or file cannot be created. Any later failure returns
    /// [`ExportError::Incomplete`] after closing the file, which is left on
    /// disk for the caller to inspect or remove.
    pub fn export(
        &self,
        scene: &SceneGraph,
        root: NodeId,
        target: &ExportTarget,
    ) -> ExportResult<ExportReport> {
        let start = Instant::now();
        let path = target.output_path(&self.options.file_extension);
        log_export_start!(target.model_name, path);

        scene.validate_hierarchy()?;
        fs::create_dir_all(&target.output_dir).map_err(|source| ExportError::CreateOutput {
            path: target.output_dir.clone(),
            source,
        })?;
        let file = File::create(&path).map_err(|source| ExportError::CreateOutput {
            path: path.clone(),
            source,
        })?;

        let mut w = MuWriter::new(BufWriter::new(file));
        let mut ctx = ExportContext::new(scene, &self.options, target);

        match self.write_model(&mut w, &mut ctx, root) {
            Ok(textures) => {
                let report = ExportReport {
                    output_path: path,
                    nodes: ctx.nodes_written,
                    materials: ctx.materials.len(),
                    textures,
                    bytes_written: w.bytes_written(),
                };
                log_export_complete!(report, start.elapsed());
                Ok(report)
            }
            Err(err) => {
                log_export_error!(path, err);
                // Close the handle before handing the path back
                drop(w);
                Err(ExportError::Incomplete {
                    path,
                    source: Box::new(err),
                })
            }
        }
    }

    fn write_model<W: Write>(
        &self,
        w: &mut MuWriter<W>,
        ctx: &mut ExportContext<'_>,
        root: NodeId,
    ) -> ExportResult<Vec<ExportedTexture>> {
        w.write_i32(MODEL_BINARY_MAGIC)?;
        w.write_i32(FORMAT_VERSION)?;
        w.write_string(&ctx.target.model_name)?;

        encode_node(w, ctx, root)?;

        let mut textures = Vec::new();
        if !ctx.materials.is_empty() {
            w.write_entry(EntryType::Materials)?;
            w.write_count(ctx.materials.len())?;
            let scene = ctx.scene;
            for entry in ctx.materials.iter() {
                encode_material(w, scene.material(entry.key)?, &mut ctx.textures)?;
                w.flush()?;
            }
            textures = export_textures(w, ctx, &self.resolver)?;
        }
        w.flush()?;
        Ok(textures)
    }
}

/// Export `root` to `output_dir/base_filename + file_extension`
///
/// Relative texture sources resolve against the working directory. Use
/// [`PartWriter`] to supply another [`AssetResolver`].
#[allow(clippy::too_many_arguments)]
pub fn export(
    model_name: &str,
    output_dir: &Path,
    base_filename: &str,
    file_extension: &str,
    scene: &SceneGraph,
    root: NodeId,
    copy_textures: bool,
    convert_textures: bool,
    rename_textures: bool,
) -> ExportResult<ExportReport> {
    let options = ExportOptions {
        file_extension: file_extension.to_string(),
        copy_textures,
        convert_textures,
        rename_textures,
    };
    let target = ExportTarget::new(model_name, output_dir, base_filename);
    PartWriter::new(options).export(scene, root, &target)
}
