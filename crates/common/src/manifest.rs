//! Provider manifest data model
//!
//! A manifest describes one external-service integration: how to
//! authenticate against it, where it lives, and which actions and triggers
//! it exposes. Field, action and trigger definitions use the same key names
//! as the rendered YAML so rendered manifests load back through serde.

use crate::ManifestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire protocol spoken by the integration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    #[default]
    Rest,
    JsonRpc,
    Graphql,
    Soap,
    Grpc,
    Websocket,
    Native,
    Ami,
    Custom,
}

impl Protocol {
    pub const ALL: [Protocol; 9] = [
        Protocol::Rest,
        Protocol::JsonRpc,
        Protocol::Graphql,
        Protocol::Soap,
        Protocol::Grpc,
        Protocol::Websocket,
        Protocol::Native,
        Protocol::Ami,
        Protocol::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Rest => "rest",
            Protocol::JsonRpc => "json_rpc",
            Protocol::Graphql => "graphql",
            Protocol::Soap => "soap",
            Protocol::Grpc => "grpc",
            Protocol::Websocket => "websocket",
            Protocol::Native => "native",
            Protocol::Ami => "ami",
            Protocol::Custom => "custom",
        }
    }
}

/// Authentication scheme the integration expects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    #[default]
    ApiKey,
    Basic,
    Bearer,
    Oauth2,
    Oauth2ClientCredentials,
    Custom,
}

impl AuthType {
    pub const ALL: [AuthType; 6] = [
        AuthType::ApiKey,
        AuthType::Basic,
        AuthType::Bearer,
        AuthType::Oauth2,
        AuthType::Oauth2ClientCredentials,
        AuthType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::ApiKey => "api_key",
            AuthType::Basic => "basic",
            AuthType::Bearer => "bearer",
            AuthType::Oauth2 => "oauth2",
            AuthType::Oauth2ClientCredentials => "oauth2_client_credentials",
            AuthType::Custom => "custom",
        }
    }
}

/// Value type of a field definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    String,
    Password,
    Number,
    Integer,
    Boolean,
    Url,
    Email,
    Text,
    Select,
    Array,
    Object,
}

impl FieldType {
    pub const ALL: [FieldType; 11] = [
        FieldType::String,
        FieldType::Password,
        FieldType::Number,
        FieldType::Integer,
        FieldType::Boolean,
        FieldType::Url,
        FieldType::Email,
        FieldType::Text,
        FieldType::Select,
        FieldType::Array,
        FieldType::Object,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Password => "password",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::Text => "text",
            FieldType::Select => "select",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }
}

/// How a trigger delivers events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    #[default]
    Webhook,
    Polling,
    Event,
}

impl TriggerType {
    pub const ALL: [TriggerType; 3] = [TriggerType::Webhook, TriggerType::Polling, TriggerType::Event];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Webhook => "webhook",
            TriggerType::Polling => "polling",
            TriggerType::Event => "event",
        }
    }
}

macro_rules! impl_wire_name {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ManifestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase().replace('-', "_");
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| ManifestError::Validation(format!("unknown {}: {}", $kind, s)))
            }
        }
    };
}

impl_wire_name!(Protocol, "protocol");
impl_wire_name!(AuthType, "auth type");
impl_wire_name!(FieldType, "field type");
impl_wire_name!(TriggerType, "trigger type");

/// A typed, named parameter shared by auth fields, action inputs/outputs and
/// trigger fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub required: bool,

    /// Mask the value wherever it is displayed
    #[serde(default)]
    pub secret: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl FieldDefinition {
    /// Create an optional, non-secret field
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }
}

/// One callable operation exposed by the integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Caller-declared safety to retry; not verified against the remote API
    #[serde(default)]
    pub is_idempotent: bool,

    #[serde(default)]
    pub inputs: Vec<FieldDefinition>,

    #[serde(default)]
    pub outputs: Vec<FieldDefinition>,
}

/// One event source exposed by the integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub trigger_type: TriggerType,

    #[serde(default)]
    pub outputs: Vec<FieldDefinition>,

    #[serde(default)]
    pub config_fields: Vec<FieldDefinition>,
}

/// Root manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderManifest {
    /// Lowercase hyphen-safe slug
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub icon_url: Option<String>,
    pub protocol: Protocol,
    pub auth_type: AuthType,
    pub auth_fields: Vec<FieldDefinition>,
    pub base_url: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub supports_webhooks: bool,
    pub actions: Vec<ActionDefinition>,
    pub triggers: Vec<TriggerDefinition>,
}

impl ProviderManifest {
    /// Create an empty REST manifest with a slugified id
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: crate::slugify(id),
            name: name.to_string(),
            version: "1.0.0".to_string(),
            ..Default::default()
        }
    }

    pub fn action(&self, id: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn trigger(&self, id: &str) -> Option<&TriggerDefinition> {
        self.triggers.iter().find(|t| t.id == id)
    }
}
