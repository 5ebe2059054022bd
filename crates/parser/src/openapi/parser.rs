//! OpenAPI spec document parser

use super::converter::{convert_to_manifest, ImportedManifest};
use super::normalize::{normalize, NormalizedSpec};
use super::types::ApiDocument;
use provider_manifest_common::{ManifestError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Text encoding a spec document is expected to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpecEncoding {
    #[default]
    Json,
    Yaml,
}

impl SpecEncoding {
    /// Guess from a URL or file path suffix and an optional content type
    pub fn detect(location: &str, content_type: Option<&str>) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_lowercase();
        let yaml_suffix = path.ends_with(".yaml") || path.ends_with(".yml");
        let yaml_content = content_type
            .map(|ct| ct.to_lowercase().contains("yaml"))
            .unwrap_or(false);

        if yaml_suffix || yaml_content {
            SpecEncoding::Yaml
        } else {
            SpecEncoding::Json
        }
    }
}

/// OpenAPI 3.x / Swagger 2.0 document parser
pub struct OpenApiParser {
    document: ApiDocument,
}

impl OpenApiParser {
    /// Load a spec from a file path, detecting YAML by extension
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("petstore.json")?;
    /// let imported = parser.parse();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let encoding = SpecEncoding::detect(&path.to_string_lossy(), None);
        Self::from_str(&content, encoding)
    }

    /// Parse spec text; JSON is always tried first, YAML only when hinted
    pub fn from_str(text: &str, encoding: SpecEncoding) -> Result<Self> {
        let value = match serde_json::from_str::<Value>(text) {
            Ok(value) => value,
            Err(json_err) => match encoding {
                SpecEncoding::Json => return Err(ManifestError::InvalidJson(json_err.to_string())),
                SpecEncoding::Yaml => {
                    debug!("spec is not JSON, parsing as YAML");
                    serde_yaml::from_str::<Value>(text)
                        .map_err(|e| ManifestError::InvalidYaml(e.to_string()))?
                }
            },
        };

        Self::from_value(value)
    }

    /// Parse spec from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_str(json, SpecEncoding::Json)
    }

    /// Parse spec from a YAML (or JSON) string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_str(yaml, SpecEncoding::Yaml)
    }

    /// Wrap an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let document = ApiDocument::from_value(value)?;
        debug!(version = document.spec_version(), "parsed API document");
        Ok(Self { document })
    }

    /// Normalize the document into the dialect-independent form
    pub fn normalize(&self) -> NormalizedSpec {
        normalize(&self.document)
    }

    /// Derive the manifest fragment
    pub fn parse(&self) -> ImportedManifest {
        convert_to_manifest(&self.normalize())
    }

    /// Get reference to the underlying document
    pub fn document(&self) -> &ApiDocument {
        &self.document
    }
}
