//! partforge CLI
//!
//! Command-line interface for exporting part scenes to `.mu` model files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

use partforge_export::textures::convert_file;
use partforge_export::{
    discover_part_definitions, ChannelLayout, ExportError, ExportOptions, ExportReport,
    ExportTarget, FsAssetResolver, PartDefinition, PartWriter, MODEL_EXTENSION,
};
use partforge_scene::SceneDescription;

/// partforge - export part scenes as .mu binary models
#[derive(Parser)]
#[command(name = "partforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for export summaries
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one part, from a part definition or from explicit flags
    Export(ExportArgs),

    /// Export every *.part.json under a directory
    ExportAll(ExportAllArgs),

    /// Synthesize a normal map from a height image
    NormalMap(NormalMapArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Part definition file; the remaining flags are ignored when given
    #[arg(short, long, conflicts_with = "scene")]
    definition: Option<PathBuf>,

    /// Scene description file
    #[arg(short, long, required_unless_present = "definition")]
    scene: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "Parts/NewPart")]
    output: PathBuf,

    /// Model name written into the file header
    #[arg(long, default_value = "NewModel")]
    model_name: String,

    /// Model file stem, also used for renamed textures
    #[arg(long, default_value = "model")]
    filename: String,

    /// Model file extension
    #[arg(long, default_value = MODEL_EXTENSION)]
    extension: String,

    /// Copy texture files next to the model
    #[arg(long)]
    copy_textures: bool,

    /// Re-encode copied textures as .mbm bitmaps
    #[arg(long)]
    convert_textures: bool,

    /// Name copied textures after the model file
    #[arg(long)]
    rename_textures: bool,

    /// Root for relative texture sources (defaults to the scene's directory)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Keep the model file when an export fails part way
    #[arg(long)]
    keep_partial: bool,
}

#[derive(Args)]
struct ExportAllArgs {
    /// Directory searched recursively for part definitions
    dir: PathBuf,

    /// Keep model files of failed exports
    #[arg(long)]
    keep_partial: bool,
}

#[derive(Args)]
struct NormalMapArgs {
    /// Height image
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Normal strength
    #[arg(long, default_value_t = 0.25)]
    strength: f32,

    /// Channel layout
    #[arg(long, value_enum, default_value_t = LayoutArg::Rgb)]
    layout: LayoutArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// (1-x, 1-z, 1-y), opaque
    Rgb,
    /// (1-y, 1-z, 1) with alpha 1-x, as in .mbm bitmaps
    Bitmap,
}

impl From<LayoutArg> for ChannelLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Rgb => ChannelLayout::Rgb,
            LayoutArg::Bitmap => ChannelLayout::PackedAlpha,
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_thread_ids(verbosity >= 3)
        .with_file(verbosity >= 3)
        .with_line_number(verbosity >= 3)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Export(args) => cmd_export(args, cli.format),
        Commands::ExportAll(args) => cmd_export_all(args, cli.format),
        Commands::NormalMap(args) => cmd_normal_map(args),
    }
}

fn cmd_export(args: ExportArgs, format: OutputFormat) -> Result<()> {
    let result = match (&args.definition, &args.scene) {
        (Some(path), _) => export_definition(path),
        (None, Some(scene)) => export_from_flags(scene, &args),
        (None, None) => bail!("Either --definition or --scene is required"),
    };
    let report = result
        .map_err(|err| discard_partial(err, args.keep_partial))
        .context("Export failed")?;
    print_report(&report, format)
}

fn export_from_flags(scene_path: &Path, args: &ExportArgs) -> Result<ExportReport, ExportError> {
    let (scene, root) = SceneDescription::load(scene_path)?.build()?;

    let asset_root = match &args.assets {
        Some(root) => root.clone(),
        None => scene_path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let options = ExportOptions {
        file_extension: args.extension.clone(),
        copy_textures: args.copy_textures,
        convert_textures: args.convert_textures,
        rename_textures: args.rename_textures,
    };
    let target = ExportTarget::new(args.model_name.clone(), args.output.clone(), args.filename.clone());

    PartWriter::with_resolver(options, FsAssetResolver::new(asset_root)).export(&scene, root, &target)
}

fn export_definition(path: &Path) -> Result<ExportReport, ExportError> {
    let definition = PartDefinition::load(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    definition.export(dir)
}

/// Remove a partially written model unless asked to keep it
fn discard_partial(err: ExportError, keep: bool) -> ExportError {
    if let Some(path) = err.partial_output() {
        if keep {
            warn!(path = %path.display(), "Keeping incomplete output");
        } else if let Err(remove) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %remove, "Could not remove incomplete output");
        } else {
            info!(path = %path.display(), "Removed incomplete output");
        }
    }
    err
}

fn cmd_export_all(args: ExportAllArgs, format: OutputFormat) -> Result<()> {
    let definitions = discover_part_definitions(&args.dir)
        .with_context(|| format!("Failed to scan {}", args.dir.display()))?;
    if definitions.is_empty() {
        warn!(dir = %args.dir.display(), "No part definitions found");
    }

    let mut reports = Vec::new();
    let mut failed = Vec::new();
    for path in &definitions {
        match export_definition(path) {
            Ok(report) => {
                info!(definition = %path.display(), "Exported");
                if format == OutputFormat::Text {
                    print_report(&report, format)?;
                }
                reports.push(report);
            }
            Err(err) => {
                error!(definition = %path.display(), error = %err, "Export failed");
                let err = discard_partial(err, args.keep_partial);
                failed.push((path.clone(), err.to_string()));
            }
        }
    }

    match format {
        OutputFormat::Text => {
            println!("Exported {} of {} parts", reports.len(), definitions.len());
            for (path, _) in &failed {
                println!("  failed: {}", path.display());
            }
        }
        OutputFormat::Json => {
            let failures: Vec<_> = failed
                .iter()
                .map(|(path, error)| serde_json::json!({ "definition": path, "error": error }))
                .collect();
            let summary = serde_json::json!({
                "exported": reports.len(),
                "total": definitions.len(),
                "parts": reports.iter().map(report_json).collect::<Vec<_>>(),
                "failed": failures,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    if !failed.is_empty() {
        bail!("{} part export(s) failed", failed.len());
    }
    Ok(())
}

fn cmd_normal_map(args: NormalMapArgs) -> Result<()> {
    convert_file(&args.input, &args.output, args.strength, args.layout.into())
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

fn print_report(report: &ExportReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!(
                "Wrote {} ({} nodes, {} materials, {} textures, {} bytes)",
                report.output_path.display(),
                report.nodes,
                report.materials,
                report.textures.len(),
                report.bytes_written
            );
            for texture in &report.textures {
                match &texture.destination {
                    Some(dest) => println!("  {:?} {} -> {}", texture.kind, texture.name, dest.display()),
                    None => println!("  {:?} {}", texture.kind, texture.name),
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report_json(report))?);
        }
    }
    Ok(())
}

fn report_json(report: &ExportReport) -> serde_json::Value {
    let textures: Vec<_> = report
        .textures
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "kind": format!("{:?}", t.kind),
                "destination": t.destination,
            })
        })
        .collect();
    serde_json::json!({
        "output_path": report.output_path,
        "nodes": report.nodes,
        "materials": report.materials,
        "textures": textures,
        "bytes_written": report.bytes_written,
    })
}
