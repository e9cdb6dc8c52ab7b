//! Texture export modes
//!
//! These tests cover:
//! - Reference, copy, copy-and-rename and convert modes
//! - Normal-map rewriting of copied files
//! - Texture kind recorded at first encounter
//! - Copying when the output directory is the asset directory

mod common;

use std::fs;
use std::path::Path;

use partforge_export::{
    ExportError, ExportOptions, ExportReport, ExportTarget, FsAssetResolver, PartWriter,
    TextureError,
};
use partforge_scene::{
    ImportSettings, Material, MeshRenderer, NodeId, SceneGraph, SceneNode, TextureAsset,
    TextureKind, TextureSlot,
};

use common::gray_png;

/// Root rendering a bumped material: `hull` as main texture and `bump`
/// as normal map flagged for conversion
fn bumped_scene() -> (SceneGraph, NodeId) {
    let mut scene = SceneGraph::new();
    let hull = scene.add_texture(TextureAsset::new("hull", "hull.PNG"));
    let mut bump = TextureAsset::new("bump", "bump.png");
    bump.import = ImportSettings {
        convert_to_normal_map: true,
        heightmap_scale: 0.25,
    };
    let bump = scene.add_texture(bump);

    let material = scene.add_material(
        Material::new("hull", "KSP/Bumped")
            .with_texture("_MainTex", TextureSlot::bound(hull))
            .with_texture("_BumpMap", TextureSlot::bound(bump)),
    );
    let mut root = SceneNode::new("root");
    root.mesh_renderer = Some(MeshRenderer::new(vec![material]));
    let root = scene.add_root(root);
    (scene, root)
}

fn export_with(assets: &Path, out: &Path, copy: bool, convert: bool, rename: bool) -> ExportReport {
    let (scene, root) = bumped_scene();
    let options = ExportOptions {
        copy_textures: copy,
        convert_textures: convert,
        rename_textures: rename,
        ..ExportOptions::default()
    };
    PartWriter::with_resolver(options, FsAssetResolver::new(assets))
        .export(&scene, root, &ExportTarget::new("Hull", out, "hull_model"))
        .unwrap()
}

fn seed_assets(dir: &Path) {
    gray_png(&dir.join("hull.PNG"), 4, 200);
    gray_png(&dir.join("bump.png"), 4, 90);
}

#[test]
fn test_reference_mode_copies_nothing() {
    let assets = tempfile::tempdir().unwrap();
    let out = assets.path().join("out");

    let report = export_with(assets.path(), &out, false, true, true);
    let names: Vec<_> = report.textures.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["hull", "bump"]);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
}

#[test]
fn test_copy_keeps_names_and_lowercases_extension() {
    let assets = tempfile::tempdir().unwrap();
    seed_assets(assets.path());
    let out = assets.path().join("out");

    let report = export_with(assets.path(), &out, true, false, false);
    let names: Vec<_> = report.textures.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["hull.png", "bump.png"]);
    assert_eq!(
        fs::read(out.join("hull.png")).unwrap(),
        fs::read(assets.path().join("hull.PNG")).unwrap()
    );
}

#[test]
fn test_copy_with_rename_uses_padded_index() {
    let assets = tempfile::tempdir().unwrap();
    seed_assets(assets.path());
    let out = assets.path().join("out");

    let report = export_with(assets.path(), &out, true, false, true);
    assert_eq!(report.textures[0].name, "hull_model000.png");
    assert_eq!(report.textures[1].name, "hull_model001.png");
    assert_eq!(report.textures[1].kind, TextureKind::NormalMap);
    assert_eq!(report.textures[1].destination.as_deref(), Some(out.join("hull_model001.png").as_path()));
}

#[test]
fn test_copied_normal_map_is_rewritten() {
    let assets = tempfile::tempdir().unwrap();
    seed_assets(assets.path());
    let out = assets.path().join("out");

    export_with(assets.path(), &out, true, false, true);

    let plain = image::open(out.join("hull_model000.png")).unwrap().to_rgb8();
    assert!(plain.pixels().all(|p| p.0 == [200, 200, 200]));
    let normals = image::open(out.join("hull_model001.png")).unwrap().to_rgb8();
    assert!(normals.pixels().all(|p| p.0 == [128, 128, 0]));
}

#[test]
fn test_convert_writes_bitmaps() {
    let assets = tempfile::tempdir().unwrap();
    seed_assets(assets.path());
    let out = assets.path().join("out");

    let report = export_with(assets.path(), &out, true, true, false);
    assert_eq!(report.textures[0].name, "hull_model000.mbm");
    assert_eq!(report.textures[1].name, "hull_model001.mbm");

    let plain = fs::read(out.join("hull_model000.mbm")).unwrap();
    assert_eq!(&plain[..4], b"\x03KSP");
    // 24-bit for an RGB source
    assert_eq!(&plain[16..20], &24i32.to_le_bytes());
    assert_eq!(plain.len(), 20 + 4 * 4 * 3);

    let bump = fs::read(out.join("hull_model001.mbm")).unwrap();
    assert_eq!(&bump[12..16], &1i32.to_le_bytes());
    assert_eq!(&bump[16..20], &32i32.to_le_bytes());
    assert_eq!(&bump[20..24], &[0, 128, 255, 128]);
}

#[test]
fn test_first_declared_kind_wins() {
    let assets = tempfile::tempdir().unwrap();
    let mut scene = SceneGraph::new();
    let shared = scene.add_texture(TextureAsset::new("shared", "shared.png"));
    let as_normal = scene.add_material(
        Material::new("a", "KSP/Bumped")
            .with_texture("_BumpMap", TextureSlot::bound(shared)),
    );
    let as_main = scene.add_material(
        Material::new("b", "Diffuse").with_texture("_MainTex", TextureSlot::bound(shared)),
    );
    let mut root = SceneNode::new("root");
    root.mesh_renderer = Some(MeshRenderer::new(vec![as_normal, as_main]));
    let root = scene.add_root(root);

    let report = PartWriter::new(ExportOptions::default())
        .export(&scene, root, &ExportTarget::new("K", assets.path(), "model"))
        .unwrap();
    assert_eq!(report.textures.len(), 1);
    assert_eq!(report.textures[0].kind, TextureKind::NormalMap);
}

#[test]
fn test_copy_into_asset_directory_leaves_source_intact() {
    let dir = tempfile::tempdir().unwrap();
    gray_png(&dir.path().join("T.png"), 4, 120);
    let before = fs::read(dir.path().join("T.png")).unwrap();

    let mut scene = SceneGraph::new();
    let texture = scene.add_texture(TextureAsset::new("T", "T.png"));
    let material = scene.add_material(
        Material::new("m", "Diffuse").with_texture("_MainTex", TextureSlot::bound(texture)),
    );
    let mut root = SceneNode::new("root");
    root.mesh_renderer = Some(MeshRenderer::new(vec![material]));
    let root = scene.add_root(root);

    let options = ExportOptions {
        copy_textures: true,
        ..ExportOptions::default()
    };
    let report = PartWriter::with_resolver(options, FsAssetResolver::new(dir.path()))
        .export(&scene, root, &ExportTarget::new("P", dir.path(), "model"))
        .unwrap();

    assert_eq!(report.textures[0].destination.as_deref(), Some(dir.path().join("T.png").as_path()));
    assert_eq!(fs::read(dir.path().join("T.png")).unwrap(), before);
}

#[test]
fn test_in_place_normal_map_rewrite_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    seed_assets(dir.path());
    let before = fs::read(dir.path().join("bump.png")).unwrap();

    let (scene, root) = bumped_scene();
    let options = ExportOptions {
        copy_textures: true,
        ..ExportOptions::default()
    };
    let err = PartWriter::with_resolver(options, FsAssetResolver::new(dir.path()))
        .export(&scene, root, &ExportTarget::new("Hull", dir.path(), "hull_model"))
        .unwrap_err();

    match err {
        ExportError::Incomplete { source, .. } => {
            assert!(matches!(*source, ExportError::Texture(TextureError::SourceIsDestination(_))));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read(dir.path().join("bump.png")).unwrap(), before);
}
