//! Spec retrieval over HTTP or from the local filesystem
//!
//! Credentials given here only authenticate the download of the spec
//! itself; they never end up in the imported manifest.

use crate::openapi::SpecEncoding;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use provider_manifest_common::{ManifestError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::path::PathBuf;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("provider-manifest/", env!("CARGO_PKG_VERSION"));

/// Credentials used to download a protected spec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchAuth {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        token: String,
    },
    ApiKey {
        header: String,
        value: String,
    },
    CustomHeader {
        header: String,
        value: String,
    },
}

impl FetchAuth {
    /// Extra request headers for this auth mode
    pub fn headers(&self) -> Vec<(String, String)> {
        match self {
            FetchAuth::None => Vec::new(),
            FetchAuth::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                vec![(AUTHORIZATION.as_str().to_string(), format!("Basic {encoded}"))]
            }
            FetchAuth::Bearer { token } => {
                vec![(AUTHORIZATION.as_str().to_string(), format!("Bearer {token}"))]
            }
            FetchAuth::ApiKey { header, value } | FetchAuth::CustomHeader { header, value } => {
                if header.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![(header.trim().to_string(), value.clone())]
                }
            }
        }
    }
}

/// Raw spec text plus what is known about its encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// URL or path the document came from
    pub location: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedDocument {
    pub fn encoding(&self) -> SpecEncoding {
        SpecEncoding::detect(&self.location, self.content_type.as_deref())
    }
}

/// Somewhere a spec document can be loaded from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpecSource: Send + Sync {
    async fn fetch(&self) -> Result<FetchedDocument>;
}

/// Downloads a spec with a single GET request
pub struct HttpSpecSource {
    url: String,
    auth: FetchAuth,
    client: reqwest::Client,
}

impl HttpSpecSource {
    pub fn new(url: &str, auth: FetchAuth) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ManifestError::EmptyUrl);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ManifestError::Network(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            auth,
            client,
        })
    }
}

#[async_trait]
impl SpecSource for HttpSpecSource {
    async fn fetch(&self) -> Result<FetchedDocument> {
        info!(url = self.url.as_str(), "fetching spec");

        let mut request = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json, application/yaml;q=0.9, */*;q=0.8");
        for (name, value) in self.auth.headers() {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ManifestError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ManifestError::Fetch {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ManifestError::Network(e.to_string()))?;

        debug!(bytes = body.len(), content_type = ?content_type, "spec downloaded");

        Ok(FetchedDocument {
            location: self.url.clone(),
            content_type,
            body,
        })
    }
}

/// Reads a spec from a local file
pub struct FileSpecSource {
    path: PathBuf,
}

impl FileSpecSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SpecSource for FileSpecSource {
    async fn fetch(&self) -> Result<FetchedDocument> {
        info!(path = %self.path.display(), "reading spec");
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(FetchedDocument {
            location: self.path.to_string_lossy().into_owned(),
            content_type: None,
            body,
        })
    }
}
