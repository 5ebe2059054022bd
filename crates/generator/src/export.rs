//! Writing rendered manifests to disk

use crate::render::render_manifest;
use provider_manifest_common::{ManifestError, ProviderManifest, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default file name for a manifest: `<id>.yaml`, or `provider.yaml` without an id
pub fn export_file_name(manifest: &ProviderManifest) -> String {
    let id = manifest.id.trim();
    if id.is_empty() {
        "provider.yaml".to_string()
    } else {
        format!("{id}.yaml")
    }
}

/// Render `manifest` to `path`, creating parent directories as needed
pub fn write_manifest(manifest: &ProviderManifest, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ManifestError::Generation(format!("Failed to create output directory: {}", e))
        })?;
    }

    let rendered = render_manifest(manifest)?;
    fs::write(path, rendered).map_err(|e| {
        ManifestError::Generation(format!("Failed to write {}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), "wrote manifest");
    Ok(())
}

/// Write into `dir` under the default file name; returns the path written
pub fn export_to_directory(manifest: &ProviderManifest, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(export_file_name(manifest));
    write_manifest(manifest, &path)?;
    Ok(path)
}
