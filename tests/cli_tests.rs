//! Tests for the partforge command-line interface

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SCENE: &str = r#"{
    "meshes": [ { "name": "quad", "positions": [ {"x": 0, "y": 0, "z": 0} ] } ],
    "materials": [ { "name": "hull", "shader": "KSP/Specular" } ],
    "root": { "name": "part", "children": [ { "name": "model", "mesh": 0, "materials": [0] } ] }
}"#;

const SCENE_MISSING_TEXTURE: &str = r#"{
    "textures": [ { "name": "gone", "source": "gone.png" } ],
    "materials": [ { "name": "hull", "shader": "Diffuse", "textures": { "_MainTex": { "texture": 0 } } } ],
    "root": { "name": "part", "materials": [0] }
}"#;

fn partforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_partforge"))
        .args(args)
        .output()
        .expect("failed to run partforge")
}

fn write_part(dir: &Path, scene: &str, definition: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("scene.json"), scene).unwrap();
    fs::write(dir.join("part.part.json"), definition).unwrap();
}

#[test]
fn test_export_from_flags() {
    let dir = tempfile::tempdir().unwrap();
    let scene = dir.path().join("scene.json");
    fs::write(&scene, SCENE).unwrap();
    let out = dir.path().join("out");

    let output = partforge(&[
        "export",
        "--scene",
        scene.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--filename",
        "wing",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("wing.mu").is_file());
    assert!(String::from_utf8_lossy(&output.stdout).contains("2 nodes"));
}

#[test]
fn test_export_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_part(dir.path(), SCENE, r#"{ "file_path": "out", "copy_textures": false }"#);
    let definition = dir.path().join("part.part.json");

    let output = partforge(&["--format", "json", "export", "--definition", definition.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["nodes"], 2);
    assert_eq!(summary["materials"], 1);
}

#[test]
fn test_export_all_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_part(&dir.path().join("a"), SCENE, r#"{ "file_path": "out" }"#);
    write_part(&dir.path().join("b"), SCENE_MISSING_TEXTURE, r#"{ "file_path": "out", "convert_textures": false }"#);

    let output = partforge(&["export-all", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Exported 1 of 2 parts"), "{stdout}");
    assert!(dir.path().join("a/out/model.mu").is_file());
    // incomplete output is removed by default
    assert!(!dir.path().join("b/out/model.mu").exists());
}

#[test]
fn test_keep_partial_leaves_incomplete_file() {
    let dir = tempfile::tempdir().unwrap();
    write_part(dir.path(), SCENE_MISSING_TEXTURE, r#"{ "file_path": "out", "convert_textures": false }"#);

    let output = partforge(&["export-all", "--keep-partial", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(dir.path().join("out/model.mu").is_file());
}

#[test]
fn test_export_all_json_is_one_document() {
    let dir = tempfile::tempdir().unwrap();
    write_part(&dir.path().join("a"), SCENE, r#"{ "file_path": "out" }"#);
    write_part(&dir.path().join("b"), SCENE_MISSING_TEXTURE, r#"{ "file_path": "out", "convert_textures": false }"#);

    let output = partforge(&["--format", "json", "export-all", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["exported"], 1);
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["parts"].as_array().unwrap().len(), 1);
    assert_eq!(summary["parts"][0]["nodes"], 2);
    let failed = summary["failed"].as_array().unwrap();
    assert_eq!(failed.len(), 1);
    assert!(failed[0]["definition"].as_str().unwrap().ends_with("part.part.json"));
    assert!(failed[0]["error"].as_str().unwrap().contains("gone.png"));
}
