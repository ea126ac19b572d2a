//! Manifest loading for argmap.
//!
//! Reads [`Manifest`](argmap_core::Manifest) documents from JSON or YAML,
//! rejects documents whose top level is not a mapping, and runs
//! [`validate_manifest`](argmap_core::validate_manifest) so every manifest
//! returned from this crate is known to be consistent.
//!
//! # Quick start
//!
//! ```no_run
//! use argmap_loader::{ManifestLoader, load_manifest};
//!
//! // A single file, format chosen by extension
//! let manifest = load_manifest("cli.yaml").unwrap();
//!
//! // A fallback chain: the first file that exists wins
//! let manifest = ManifestLoader::new()
//!     .from_file("argmap.yaml")
//!     .from_file("argmap.json")
//!     .load()
//!     .unwrap();
//! ```
//!
//! Positional entries use string keys; in YAML they must be quoted
//! (`"0": { type: string }`).

mod document;
mod error;
mod loader;

pub use document::{ManifestFormat, load_manifest, manifest_from_str};
pub use error::{LoadError, Result};
pub use loader::{ManifestLoader, ManifestSource};
