//! partforge-export
//!
//! Writes scene graphs as `.mu` binary model files.
//!
//! # File Layout
//!
//! | Section | Contents |
//! |---------|----------|
//! | Header | magic, format version, model name |
//! | Node tree | transform, tag/layer and component records per node, children nested in start/end markers |
//! | Materials | pooled materials in first-use order (only if any were used) |
//! | Textures | output name and kind of each pooled texture (only if any were used) |
//!
//! # Example
//!
//! ```rust,no_run
//! use partforge_export::{ExportOptions, ExportTarget, PartWriter};
//! use partforge_scene::{SceneGraph, SceneNode};
//!
//! let mut scene = SceneGraph::new();
//! let root = scene.add_root(SceneNode::new("part"));
//!
//! let writer = PartWriter::new(ExportOptions::default());
//! let target = ExportTarget::new("MyPart", "out/MyPart", "model");
//! let report = writer.export(&scene, root, &target)?;
//! println!("Wrote {} nodes to {}", report.nodes, report.output_path.display());
//! # Ok::<(), partforge_export::ExportError>(())
//! ```

pub mod assets;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod exporter;
pub mod format;
pub mod logging;
pub mod material;
pub mod mesh;
pub mod pool;
pub mod shader;
pub mod textures;
pub mod walker;
pub mod writer;

pub use assets::{AssetResolver, FsAssetResolver};
pub use config::{discover_part_definitions, PartDefinition, PART_DEFINITION_SUFFIX};
pub use context::ExportContext;
pub use error::{ExportError, ExportResult};
pub use exporter::{export, ExportOptions, ExportReport, ExportTarget, PartWriter};
pub use format::{EntryType, FORMAT_VERSION, MODEL_BINARY_MAGIC, MODEL_EXTENSION};
pub use pool::{PoolEntry, ResourcePool};
pub use shader::{MaterialField, ShaderType};
pub use textures::{
    ChannelLayout, ExportedTexture, HeightField, TextureError, TextureExportMode, TextureResult,
};
pub use writer::MuWriter;
