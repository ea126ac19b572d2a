//! Manifest lookup with a fallback chain.
//!
//! ```no_run
//! use argmap_loader::ManifestLoader;
//!
//! let manifest = ManifestLoader::new()
//!     .from_file("argmap.yaml")
//!     .from_file("argmap.json")
//!     .load()
//!     .unwrap();
//! ```

use std::path::{Path, PathBuf};

use argmap_core::Manifest;
use tracing::debug;

use crate::document::{ManifestFormat, load_manifest, manifest_from_str};
use crate::error::{LoadError, Result};

/// Describes where a manifest can be loaded from.
#[derive(Debug, Clone)]
pub enum ManifestSource {
    /// A `.json`, `.yaml` or `.yml` file.
    File(PathBuf),
    /// An in-memory document.
    Inline { raw: String, format: ManifestFormat },
}

impl ManifestSource {
    fn describe(&self) -> String {
        match self {
            ManifestSource::File(path) => path.display().to_string(),
            ManifestSource::Inline { .. } => "<inline>".to_string(),
        }
    }
}

/// Builder for loading the first available manifest from several sources.
///
/// Sources are tried in the order they are added. A file that does not
/// exist is skipped; any other failure (unreadable file, syntax error,
/// invalid manifest) stops the chain and is returned as-is, so a broken
/// manifest is never silently replaced by a later one. If every source is
/// missing, [`LoadError::NotFound`] is returned.
#[derive(Debug, Default)]
pub struct ManifestLoader {
    sources: Vec<ManifestSource>,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file source to the chain.
    pub fn from_file(mut self, path: impl AsRef<Path>) -> Self {
        self.sources
            .push(ManifestSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Adds an in-memory document to the chain.
    pub fn from_inline(mut self, raw: impl Into<String>, format: ManifestFormat) -> Self {
        self.sources.push(ManifestSource::Inline {
            raw: raw.into(),
            format,
        });
        self
    }

    /// Sources in the order they will be tried.
    pub fn sources(&self) -> &[ManifestSource] {
        &self.sources
    }

    /// Loads from the first source that exists.
    ///
    /// Returns the manifest together with the source it came from.
    pub fn load_with_source(self) -> Result<(Manifest, ManifestSource)> {
        for source in &self.sources {
            let loaded = match source {
                ManifestSource::File(path) => {
                    if !path.exists() {
                        debug!(path = %path.display(), "manifest not found, trying next source");
                        continue;
                    }
                    load_manifest(path)
                }
                ManifestSource::Inline { raw, format } => manifest_from_str(raw, *format),
            };
            return loaded.map(|manifest| (manifest, source.clone()));
        }

        let tried: Vec<String> = self.sources.iter().map(ManifestSource::describe).collect();
        Err(LoadError::NotFound(if tried.is_empty() {
            "no sources".to_string()
        } else {
            tried.join(", ")
        }))
    }

    /// Loads from the first source that exists.
    pub fn load(self) -> Result<Manifest> {
        self.load_with_source().map(|(manifest, _)| manifest)
    }
}
