//! Error types for manifest loading.
//!
//! Covers every failure mode between a path on disk and a validated
//! [`Manifest`](argmap_core::Manifest): I/O, JSON/YAML syntax, unsupported
//! file extensions, and manifests that fail validation.

use std::path::PathBuf;

use argmap_core::DeveloperError;
use thiserror::Error;

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported manifest format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Document parsed but the manifest is inconsistent.
    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] DeveloperError),

    /// No configured source exists.
    #[error("no manifest found (tried {0})")]
    NotFound(String),
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
