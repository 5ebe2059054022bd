//! Converts a normalized OpenAPI spec into a manifest fragment

use super::normalize::{NormalizedBody, NormalizedOperation, NormalizedParameter, NormalizedSpec};
use super::types::SecurityScheme;
use crate::operation_mapper::OperationNamer;
use crate::type_mapper::TypeMapper;
use provider_manifest_common::{
    humanize_label, sanitize_identifier, slugify, to_snake_case, ActionDefinition, AuthType,
    FieldDefinition, FieldType, ProviderManifest,
};
use tracing::{debug, warn};

/// The parts of a manifest an OpenAPI import derives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedManifest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub base_url: Option<String>,
    pub auth_type: AuthType,
    pub auth_fields: Vec<FieldDefinition>,
    pub actions: Vec<ActionDefinition>,
}

impl ImportedManifest {
    /// Commit the import onto an existing manifest, returning the new value
    ///
    /// Identity the import cannot know (id when already set, icon,
    /// protocol, labels, triggers) is kept from `manifest`.
    pub fn apply_to(&self, manifest: &ProviderManifest) -> ProviderManifest {
        let mut next = manifest.clone();
        if next.id.is_empty() {
            next.id = slugify(&self.name);
        }
        next.name = self.name.clone();
        next.description = self.description.clone();
        next.version = self.version.clone();
        next.base_url = self.base_url.clone();
        next.auth_type = self.auth_type;
        next.auth_fields = self.auth_fields.clone();
        next.actions = self.actions.clone();
        next
    }

    /// Build a fresh manifest from the import alone
    pub fn into_manifest(self) -> ProviderManifest {
        let mut manifest = ProviderManifest::new(&self.name, &self.name);
        manifest.description = self.description;
        manifest.version = self.version;
        manifest.base_url = self.base_url;
        manifest.auth_type = self.auth_type;
        manifest.auth_fields = self.auth_fields;
        manifest.actions = self.actions;
        manifest
    }
}

/// Convert a normalized spec into a manifest fragment
pub fn convert_to_manifest(spec: &NormalizedSpec) -> ImportedManifest {
    let (auth_type, auth_fields) = derive_auth(&spec.security_schemes);
    let actions: Vec<ActionDefinition> = spec.operations.iter().map(build_action).collect();

    debug!(
        title = spec.title.as_str(),
        auth = auth_type.as_str(),
        actions = actions.len(),
        "converted spec"
    );

    ImportedManifest {
        name: spec.title.clone(),
        description: spec.description.clone().unwrap_or_default(),
        version: spec.version.clone(),
        base_url: spec.base_url.clone(),
        auth_type,
        auth_fields,
        actions,
    }
}

/// Derive the auth type and credential fields from declared security schemes
///
/// The last recognized scheme decides the auth type. Fields accumulate
/// across schemes; a field whose name is already present is skipped.
fn derive_auth(schemes: &[(String, SecurityScheme)]) -> (AuthType, Vec<FieldDefinition>) {
    let mut auth_type = AuthType::ApiKey;
    let mut fields: Vec<FieldDefinition> = Vec::new();

    for (scheme_name, scheme) in schemes {
        let Some((scheme_auth, scheme_fields)) = fields_for_scheme(scheme_name, scheme) else {
            warn!(
                scheme = scheme_name.as_str(),
                scheme_type = scheme.scheme_type.as_str(),
                "unsupported security scheme ignored"
            );
            continue;
        };

        auth_type = scheme_auth;
        for field in scheme_fields {
            if fields.iter().any(|f| f.name == field.name) {
                warn!(
                    scheme = scheme_name.as_str(),
                    field = field.name.as_str(),
                    "duplicate auth field skipped"
                );
                continue;
            }
            fields.push(field);
        }
    }

    if schemes.is_empty() {
        fields.push(
            FieldDefinition::new("api_key", "API Key", FieldType::Password)
                .with_description("API key used to authenticate requests")
                .required(true)
                .secret(true),
        );
    }

    (auth_type, fields)
}

fn fields_for_scheme(
    scheme_name: &str,
    scheme: &SecurityScheme,
) -> Option<(AuthType, Vec<FieldDefinition>)> {
    let http_scheme = scheme.scheme.as_deref().map(str::to_lowercase);

    match (scheme.scheme_type.as_str(), http_scheme.as_deref()) {
        ("apiKey", _) => {
            let raw_name = scheme.name.as_deref().unwrap_or(scheme_name);
            let location = scheme.location.as_deref().unwrap_or("header");
            let field = FieldDefinition::new(
                field_name(raw_name),
                format!("API Key ({location})"),
                FieldType::Password,
            )
            .with_description(format!("Sent as the '{raw_name}' {location} value"))
            .required(true)
            .secret(true);
            Some((AuthType::ApiKey, vec![field]))
        }
        ("http", Some("bearer")) => {
            let field = FieldDefinition::new("access_token", "Access Token", FieldType::Password)
                .with_description("Bearer token sent in the Authorization header")
                .required(true)
                .secret(true);
            Some((AuthType::Bearer, vec![field]))
        }
        ("http", Some("basic")) | ("basic", _) => Some((
            AuthType::Basic,
            vec![
                FieldDefinition::new("username", "Username", FieldType::String).required(true),
                FieldDefinition::new("password", "Password", FieldType::Password)
                    .required(true)
                    .secret(true),
            ],
        )),
        ("oauth2", _) => {
            let auth_type = if is_client_credentials_only(scheme) {
                AuthType::Oauth2ClientCredentials
            } else {
                AuthType::Oauth2
            };
            Some((
                auth_type,
                vec![
                    FieldDefinition::new("client_id", "Client ID", FieldType::String)
                        .required(true),
                    FieldDefinition::new("client_secret", "Client Secret", FieldType::Password)
                        .required(true)
                        .secret(true),
                ],
            ))
        }
        _ => None,
    }
}

fn is_client_credentials_only(scheme: &SecurityScheme) -> bool {
    match scheme.flow.as_deref() {
        Some(flow) => flow == "application",
        None => scheme.flows.len() == 1 && scheme.flows.contains_key("clientCredentials"),
    }
}

fn build_action(op: &NormalizedOperation) -> ActionDefinition {
    let mut inputs: Vec<FieldDefinition> = Vec::new();
    let candidates = op
        .parameters
        .iter()
        .map(parameter_field)
        .chain(op.body.iter().flat_map(body_fields));
    for field in candidates {
        if inputs.iter().any(|f| f.name == field.name) {
            debug!(
                path = op.path.as_str(),
                field = field.name.as_str(),
                "duplicate input skipped"
            );
            continue;
        }
        inputs.push(field);
    }

    ActionDefinition {
        id: OperationNamer::action_id(op.operation_id.as_deref(), &op.path, op.method),
        name: OperationNamer::action_name(op.summary.as_deref(), &op.path, op.method),
        description: op
            .description
            .clone()
            .or_else(|| op.summary.clone())
            .unwrap_or_default(),
        category: op.tags.first().cloned(),
        is_idempotent: op.method.is_idempotent(),
        inputs,
        outputs: vec![response_field()],
    }
}

fn parameter_field(param: &NormalizedParameter) -> FieldDefinition {
    let name = field_name(&param.name);
    FieldDefinition {
        label: humanize_label(&name),
        field_type: TypeMapper::map_type(param.type_name.as_deref(), param.format.as_deref()),
        description: param.description.clone().unwrap_or_default(),
        required: param.required || param.location == "path",
        name,
        ..Default::default()
    }
}

/// A property is required when the body is, unless the schema names a
/// narrower set in its `required` list
fn body_fields(body: &NormalizedBody) -> Vec<FieldDefinition> {
    body.properties
        .iter()
        .map(|(prop_name, schema)| {
            let name = field_name(prop_name);
            let required = body.required
                && (body.required_properties.is_empty()
                    || body.required_properties.iter().any(|r| r == prop_name));
            FieldDefinition {
                label: humanize_label(&name),
                field_type: TypeMapper::map_type(schema.type_name(), schema.format.as_deref()),
                description: schema.description.clone().unwrap_or_default(),
                required,
                secret: TypeMapper::is_sensitive(&name),
                name,
                ..Default::default()
            }
        })
        .collect()
}

fn response_field() -> FieldDefinition {
    FieldDefinition::new("response", "Response", FieldType::Object)
        .with_description("API response data")
}

/// Identifier-safe field name for a raw parameter, property or header name
fn field_name(raw: &str) -> String {
    sanitize_identifier(&to_snake_case(raw))
}
