//! Manifest output for Provider Manifest
//!
//! This crate turns a `ProviderManifest` into its YAML form, reads that
//! form back, writes it to disk and publishes it to a registry API.

mod export;
mod loader;
mod publish;
mod render;

pub use export::{export_file_name, export_to_directory, write_manifest};
pub use loader::{load_manifest, load_manifest_file};
pub use publish::ManifestClient;
pub use render::{quote, render_manifest};

use provider_manifest_common::{validate, ProviderManifest, Result, ValidationIssue};
use std::path::{Path, PathBuf};

/// Manifest generator
///
/// Wraps a finished manifest and produces its artifacts:
/// - rendered YAML
/// - `<id>.yaml` on disk
pub struct ManifestGenerator {
    manifest: ProviderManifest,
}

impl ManifestGenerator {
    pub fn new(manifest: ProviderManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &ProviderManifest {
        &self.manifest
    }

    /// Problems that should be fixed before publishing
    pub fn issues(&self) -> Vec<ValidationIssue> {
        validate(&self.manifest)
    }

    pub fn render(&self) -> Result<String> {
        render_manifest(&self.manifest)
    }

    pub fn file_name(&self) -> String {
        export_file_name(&self.manifest)
    }

    /// Write the manifest into `output_dir` under its default file name
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<PathBuf> {
        export_to_directory(&self.manifest, output_dir)
    }
}
