use std::fs;
use std::path::{Path, PathBuf};

use argmap_core::{ErrorCode, OptionKind, Value, parse, syntax};
use argmap_loader::{LoadError, ManifestLoader, ManifestSource, load_manifest};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const DEPLOY_YAML: &str = r#"
env:
  type: string
  allow: [staging, production]
  required: true
replicas:
  type: int
  default: 2
dry-run:
  type: boolean
  description: Print the plan without applying it
"0":
  type: string
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[test]
fn test_yaml_file_drives_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "deploy.yaml", DEPLOY_YAML);

    let manifest = load_manifest(&path).unwrap();
    let keys: Vec<&str> = manifest.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["env", "replicas", "dry-run", "0"]);
    assert_eq!(manifest.get("replicas").unwrap().kind, OptionKind::Int);

    let args = parse(Some(&manifest), ["--env", "staging", "--dry-run", "web"]).unwrap();
    assert_eq!(args.get_str("env"), Some("staging"));
    assert_eq!(args.get_int("replicas"), Some(2));
    assert_eq!(args.get_bool("dry-run"), Some(true));
    assert_eq!(args.get_index(0), Some(&Value::from("web")));

    let err = parse(Some(&manifest), ["--env", "qa"]).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidOptValue));

    assert_eq!(
        syntax(Some(&manifest)),
        "-env=<staging|production> [-replicas=<int>] [-dry-run] [<string>]"
    );
}

#[test]
fn test_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "tool.json",
        r#"{ "level": { "type": "float", "allow": [0.5, 1, 2], "default": 1 } }"#,
    );

    let manifest = load_manifest(&path).unwrap();
    let args = parse(Some(&manifest), Vec::<String>::new()).unwrap();
    assert_eq!(args.get_float("level"), Some(1.0));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "tool.toml", "[x]\n");

    let err = load_manifest(&path).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(p) if p == path));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_manifest(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_unknown_type_is_invalid_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bad.yml", "count: { type: number }\n");

    let err = load_manifest(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid manifest: option `count` has unrecognized type `number` (expected boolean, string, int or float)"
    );
}

// ---------------------------------------------------------------------------
// Fallback chain
// ---------------------------------------------------------------------------

#[test]
fn test_loader_picks_first_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let json = write(dir.path(), "argmap.json", r#"{ "x": { "type": "int" } }"#);

    let (manifest, source) = ManifestLoader::new()
        .from_file(dir.path().join("argmap.yaml"))
        .from_file(&json)
        .load_with_source()
        .unwrap();

    assert!(manifest.contains("x"));
    assert!(matches!(source, ManifestSource::File(p) if p == json));
}

#[test]
fn test_loader_lists_tried_paths() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.yaml");
    let b = dir.path().join("b.json");

    let err = ManifestLoader::new().from_file(&a).from_file(&b).load().unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("no manifest found (tried {}, {})", a.display(), b.display())
    );
}

#[test]
fn test_loader_does_not_skip_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write(dir.path(), "argmap.yaml", "x: { type: int, default: nope }\n");
    let good = write(dir.path(), "argmap.json", r#"{ "x": { "type": "int" } }"#);

    let err = ManifestLoader::new()
        .from_file(&broken)
        .from_file(&good)
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::InvalidManifest(_)));
}
