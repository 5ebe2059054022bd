//! Built-in starting manifests

use crate::{
    ActionDefinition, AuthType, FieldDefinition, FieldType, ProviderManifest, TriggerDefinition,
    TriggerType,
};

/// Name and one-line summary of a built-in template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: &'static str,
    pub summary: &'static str,
}

const TEMPLATES: [TemplateInfo; 4] = [
    TemplateInfo {
        name: "blank",
        summary: "Empty REST provider with a single API key",
    },
    TemplateInfo {
        name: "rest-api-key",
        summary: "REST API authenticated by an API key header, with a sample list action",
    },
    TemplateInfo {
        name: "rest-oauth2",
        summary: "REST API using OAuth2 client credentials",
    },
    TemplateInfo {
        name: "webhook-source",
        summary: "Event source that delivers payloads through a webhook trigger",
    },
];

/// List the built-in templates
pub fn builtin_templates() -> &'static [TemplateInfo] {
    &TEMPLATES
}

/// Build a fresh manifest from a named template
pub fn template(name: &str) -> Option<ProviderManifest> {
    let manifest = match name {
        "blank" => blank(),
        "rest-api-key" => rest_api_key(),
        "rest-oauth2" => rest_oauth2(),
        "webhook-source" => webhook_source(),
        _ => return None,
    };
    Some(manifest)
}

fn api_key_field() -> FieldDefinition {
    FieldDefinition::new("api_key", "API Key", FieldType::Password)
        .with_description("API key used to authenticate requests")
        .required(true)
        .secret(true)
}

fn response_field() -> FieldDefinition {
    FieldDefinition::new("response", "Response", FieldType::Object)
        .with_description("API response data")
}

fn blank() -> ProviderManifest {
    let mut manifest = ProviderManifest::new("my-provider", "My Provider");
    manifest.auth_fields.push(api_key_field());
    manifest
}

fn rest_api_key() -> ProviderManifest {
    let mut manifest = ProviderManifest::new("rest-service", "REST Service");
    manifest.description = "Generic REST API authenticated with an API key".to_string();
    manifest.base_url = Some("https://api.example.com/v1".to_string());
    manifest.categories.push("api".to_string());
    manifest.auth_fields.push(api_key_field());
    manifest.actions.push(ActionDefinition {
        id: "list_items".to_string(),
        name: "List items".to_string(),
        description: "Fetch a page of items".to_string(),
        category: Some("items".to_string()),
        is_idempotent: true,
        inputs: vec![
            FieldDefinition::new("limit", "Limit", FieldType::Integer)
                .with_description("Maximum number of items to return")
                .with_default("50"),
        ],
        outputs: vec![response_field()],
    });
    manifest
}

fn rest_oauth2() -> ProviderManifest {
    let mut manifest = ProviderManifest::new("oauth-service", "OAuth Service");
    manifest.description = "REST API using the OAuth2 client-credentials flow".to_string();
    manifest.auth_type = AuthType::Oauth2ClientCredentials;
    manifest.auth_fields = vec![
        FieldDefinition::new("client_id", "Client ID", FieldType::String).required(true),
        FieldDefinition::new("client_secret", "Client Secret", FieldType::Password)
            .required(true)
            .secret(true),
        FieldDefinition::new("token_url", "Token URL", FieldType::Url)
            .with_placeholder("https://auth.example.com/oauth/token"),
    ];
    manifest
}

fn webhook_source() -> ProviderManifest {
    let mut manifest = ProviderManifest::new("webhook-source", "Webhook Source");
    manifest.description = "Receives events pushed by the remote service".to_string();
    manifest.supports_webhooks = true;
    manifest.auth_type = AuthType::Custom;
    manifest.auth_fields.push(
        FieldDefinition::new("signing_secret", "Signing Secret", FieldType::Password)
            .with_description("Secret used to verify webhook signatures")
            .required(true)
            .secret(true),
    );
    manifest.triggers.push(TriggerDefinition {
        id: "event_received".to_string(),
        name: "Event received".to_string(),
        description: "Fires for every webhook delivery".to_string(),
        trigger_type: TriggerType::Webhook,
        outputs: vec![FieldDefinition::new("payload", "Payload", FieldType::Object)],
        config_fields: vec![FieldDefinition::new("event_types", "Event Types", FieldType::Array)
            .with_description("Only deliver these event types")],
    });
    manifest
}
