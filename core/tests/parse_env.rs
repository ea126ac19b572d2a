//! Runs `parse_env` in a child copy of this binary so the argument vector is
//! known. Built without the libtest harness, which would otherwise own argv.

use std::env;
use std::process::Command;

use argmap_core::{Manifest, OptionSpec, parse_env};

const CHILD_VAR: &str = "ARGMAP_PARSE_ENV_CHILD";

fn main() {
    if env::var_os(CHILD_VAR).is_some() {
        run_child();
    } else {
        test_parse_env_skips_executable_and_leaves_args();
        test_parse_env_applies_manifest();
        println!("parse_env: 2 passed");
    }
}

fn run_child() {
    let manifest = Manifest::new()
        .with_option("name", OptionSpec::string())
        .with_option("jobs", OptionSpec::int().with_default(1))
        .with_option("x", OptionSpec::boolean())
        .with_option("v", OptionSpec::boolean());
    let with_manifest = env::var(CHILD_VAR).is_ok_and(|mode| mode == "manifest");

    let before: Vec<String> = env::args().collect();
    let args = parse_env(with_manifest.then_some(&manifest)).unwrap();
    let after: Vec<String> = env::args().collect();

    let report = serde_json::json!({
        "values": args,
        "positionals": args.positionals(),
        "args_unchanged": before == after,
        "args_len": after.len(),
    });
    println!("{report}");
}

fn spawn_child(mode: &str, tokens: &[&str]) -> serde_json::Value {
    let exe = env::current_exe().unwrap();
    let output = Command::new(exe)
        .args(tokens)
        .env(CHILD_VAR, mode)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "child failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

fn test_parse_env_skips_executable_and_leaves_args() {
    let report = spawn_child("free", &["--name=ada", "build", "-xv"]);

    assert_eq!(
        report["values"],
        serde_json::json!({ "0": "build", "name": "ada", "x": true, "v": true })
    );
    assert_eq!(report["positionals"], serde_json::json!(["build"]));
    assert_eq!(report["args_unchanged"], true);
    // executable path plus the three tokens
    assert_eq!(report["args_len"], 4);
}

fn test_parse_env_applies_manifest() {
    let report = spawn_child("manifest", &["-v", "deploy", "--jobs", "0x10"]);

    assert_eq!(
        report["values"],
        serde_json::json!({ "0": "deploy", "jobs": 16, "v": true })
    );
    assert_eq!(report["args_unchanged"], true);
}
