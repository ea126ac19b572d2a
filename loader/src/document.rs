//! Manifest documents in JSON and YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! verbose: { type: boolean, description: "chatty output" }
//! format:  { type: string, allow: [json, yaml], default: json }
//! jobs:    { type: int, default: 4 }
//! "0":     { type: string, required: true }
//! ```

use std::path::Path;

use argmap_core::{DeveloperError, Manifest, validate_manifest};
use tracing::debug;

use crate::error::{LoadError, Result};

/// Serialization format of a manifest document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Picks the format from a file extension (`.json`, `.yaml`, `.yml`).
    ///
    /// # Examples
    ///
    /// ```
    /// use argmap_loader::ManifestFormat;
    ///
    /// assert_eq!(ManifestFormat::from_path("cli.yml"), Some(ManifestFormat::Yaml));
    /// assert_eq!(ManifestFormat::from_path("cli.JSON"), Some(ManifestFormat::Json));
    /// assert_eq!(ManifestFormat::from_path("cli.toml"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parses and validates a manifest document.
///
/// # Errors
///
/// Returns [`LoadError::Json`] or [`LoadError::Yaml`] on syntax errors or
/// malformed entries, and [`LoadError::InvalidManifest`] when the top level
/// is not a mapping or the manifest fails validation.
///
/// # Examples
///
/// ```
/// use argmap_loader::{ManifestFormat, manifest_from_str};
///
/// let manifest = manifest_from_str(
///     "jobs: { type: int, default: 2 }\nquiet: { type: boolean }\n",
///     ManifestFormat::Yaml,
/// ).unwrap();
/// assert_eq!(manifest.len(), 2);
/// assert!(manifest.is_boolean_option("quiet"));
/// ```
pub fn manifest_from_str(raw: &str, format: ManifestFormat) -> Result<Manifest> {
    let manifest: Manifest = match format {
        ManifestFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(raw)?;
            if !value.is_object() {
                return Err(not_a_mapping(json_kind(&value)));
            }
            serde_json::from_value(value)?
        }
        ManifestFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(raw)?;
            if !value.is_mapping() {
                return Err(not_a_mapping(yaml_kind(&value)));
            }
            serde_yaml::from_value(value)?
        }
    };
    validate_manifest(&manifest)?;
    debug!(entries = manifest.len(), ?format, "loaded manifest");
    Ok(manifest)
}

/// Reads, parses and validates a manifest file, choosing the format from
/// its extension.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] for unknown extensions,
/// [`LoadError::Io`] if the file cannot be read, and otherwise the errors of
/// [`manifest_from_str`].
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let format = ManifestFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let raw = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), "read manifest file");
    manifest_from_str(&raw, format)
}

fn not_a_mapping(found: &str) -> LoadError {
    LoadError::InvalidManifest(DeveloperError::NotAMapping(found.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "a mapping",
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
