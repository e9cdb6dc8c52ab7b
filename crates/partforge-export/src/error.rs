//! Export error types

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::textures::TextureError;

/// Errors returned by an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output directory or model file could not be created. Nothing
    /// has been written.
    #[error("Cannot create output {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing failed after the model file was opened. The file has been
    /// closed and left on disk, possibly truncated.
    #[error("Export to {path} failed, output is incomplete: {source}")]
    Incomplete {
        path: PathBuf,
        #[source]
        source: Box<ExportError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Scene error: {0}")]
    Scene(#[from] partforge_core::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

impl ExportError {
    /// Path of a partially written model file, if this error left one behind
    pub fn partial_output(&self) -> Option<&Path> {
        match self {
            ExportError::Incomplete { path, .. } => Some(path),
            _ => None,
        }
    }
}
