//! Import entry points tying retrieval and parsing together

use crate::fetch::{FetchAuth, FileSpecSource, HttpSpecSource, SpecSource};
use crate::openapi::{ImportedManifest, OpenApiParser, SpecEncoding};
use provider_manifest_common::Result;
use std::path::Path;
use tracing::info;

/// Fetch a spec from any source and derive the manifest fragment
pub async fn import<S: SpecSource + ?Sized>(source: &S) -> Result<ImportedManifest> {
    let document = source.fetch().await?;
    let encoding = document.encoding();
    let imported = import_from_str(&document.body, encoding)?;

    info!(
        location = document.location.as_str(),
        actions = imported.actions.len(),
        auth_fields = imported.auth_fields.len(),
        "imported spec"
    );
    Ok(imported)
}

/// Download and import a spec; a blank URL is rejected before any request
pub async fn import_from_url(url: &str, auth: FetchAuth) -> Result<ImportedManifest> {
    let source = HttpSpecSource::new(url, auth)?;
    import(&source).await
}

pub async fn import_from_file(path: impl AsRef<Path>) -> Result<ImportedManifest> {
    let source = FileSpecSource::new(path.as_ref());
    import(&source).await
}

/// Import spec text that is already in memory
pub fn import_from_str(text: &str, encoding: SpecEncoding) -> Result<ImportedManifest> {
    Ok(OpenApiParser::from_str(text, encoding)?.parse())
}
