//! Saving manifests to a provider registry API

use crate::render::render_manifest;
use provider_manifest_common::{ManifestError, ProviderManifest, Result};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    manifest_yaml: &'a str,
}

/// Client for the registry's `/api/providers` endpoint
pub struct ManifestClient {
    base_url: String,
    client: reqwest::Client,
}

impl ManifestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/providers", self.base_url)
    }

    /// Render and POST a manifest; a single attempt, no retry
    pub async fn save(&self, manifest: &ProviderManifest) -> Result<()> {
        let manifest_yaml = render_manifest(manifest)?;
        let endpoint = self.endpoint();
        info!(endpoint = endpoint.as_str(), id = manifest.id.as_str(), "saving manifest");

        let response = self
            .client
            .post(&endpoint)
            .json(&SaveRequest {
                manifest_yaml: &manifest_yaml,
            })
            .send()
            .await
            .map_err(|e| ManifestError::Save(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "manifest save rejected");
            let detail = if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{} {}", status, body.trim())
            };
            return Err(ManifestError::Save(detail));
        }

        Ok(())
    }
}
