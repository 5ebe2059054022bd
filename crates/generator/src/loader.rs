//! Manifest YAML loading

use provider_manifest_common::{
    ActionDefinition, AuthType, FieldDefinition, ManifestError, Protocol, ProviderManifest,
    Result, TriggerDefinition,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// On-disk layout of a manifest; mirrors what `render_manifest` writes
#[derive(Debug, Deserialize)]
struct ManifestDoc {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    icon_url: Option<String>,
    #[serde(default)]
    protocol: Protocol,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    auth: AuthDoc,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    supports_webhooks: bool,
    #[serde(default)]
    actions: Vec<ActionDefinition>,
    #[serde(default)]
    triggers: Vec<TriggerDefinition>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthDoc {
    #[serde(rename = "type", default)]
    auth_type: AuthType,
    #[serde(default)]
    fields: Vec<FieldDefinition>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl From<ManifestDoc> for ProviderManifest {
    fn from(doc: ManifestDoc) -> Self {
        ProviderManifest {
            id: doc.id,
            name: doc.name,
            description: doc.description,
            version: doc.version,
            icon_url: doc.icon_url,
            protocol: doc.protocol,
            auth_type: doc.auth.auth_type,
            auth_fields: doc.auth.fields,
            base_url: doc.base_url,
            categories: doc.categories,
            tags: doc.tags,
            supports_webhooks: doc.supports_webhooks,
            actions: doc.actions,
            triggers: doc.triggers,
        }
    }
}

/// Parse manifest YAML back into the model
pub fn load_manifest(yaml: &str) -> Result<ProviderManifest> {
    let doc: ManifestDoc =
        serde_yaml::from_str(yaml).map_err(|e| ManifestError::InvalidYaml(e.to_string()))?;
    debug!(
        id = doc.id.as_str(),
        actions = doc.actions.len(),
        triggers = doc.triggers.len(),
        "loaded manifest"
    );
    Ok(doc.into())
}

/// Read and parse a manifest file
pub fn load_manifest_file<P: AsRef<Path>>(path: P) -> Result<ProviderManifest> {
    let yaml = std::fs::read_to_string(path)?;
    load_manifest(&yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use provider_manifest_common::{FieldType, TriggerType};

    #[test]
    fn test_load_hand_written_manifest() {
        let yaml = r#"
id: github
name: GitHub
protocol: graphql
categories: [dev]
auth:
  type: oauth2
  fields:
    - name: client_id
      label: Client ID
      type: string
      required: true
actions:
  - id: list_repos
    name: List repositories
    is_idempotent: true
triggers:
  - id: on_push
    trigger_type: webhook
"#;

        let manifest = load_manifest(yaml).unwrap();
        assert_eq!(manifest.id, "github");
        assert_eq!(manifest.version, "1.0.0");
        assert_eq!(manifest.protocol, Protocol::Graphql);
        assert_eq!(manifest.auth_type, AuthType::Oauth2);
        assert_eq!(manifest.auth_fields[0].field_type, FieldType::String);
        assert!(manifest.auth_fields[0].required);
        assert!(!manifest.auth_fields[0].secret);
        assert!(manifest.actions[0].inputs.is_empty());
        assert_eq!(manifest.triggers[0].trigger_type, TriggerType::Webhook);
        assert!(manifest.base_url.is_none());
    }

    #[test]
    fn test_empty_document_defaults() {
        let manifest = load_manifest("{}").unwrap();
        assert!(manifest.id.is_empty());
        assert_eq!(manifest.auth_type, AuthType::ApiKey);
        assert_eq!(manifest.protocol, Protocol::Rest);
    }

    #[test]
    fn test_unknown_enum_value() {
        let err = load_manifest("id: x\nprotocol: carrier_pigeon\n").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidYaml(_)));
    }
}
