//! OpenAPI 3.x and Swagger 2.0 type definitions
//!
//! Simplified representation focusing on what a manifest needs: metadata,
//! servers, security schemes, operations, parameters and top-level request
//! body properties. Unknown keys are ignored. Maps keep the order the
//! document declares them in.

use indexmap::IndexMap;
use provider_manifest_common::{ManifestError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A parsed API description in one of the two supported dialects
#[derive(Debug, Clone)]
pub enum ApiDocument {
    /// OpenAPI 3.x (`openapi` version field)
    OpenApi3 { version: String, doc: OpenApi3Doc },

    /// Swagger 2.0 (`swagger` version field)
    Swagger2 { version: String, doc: Swagger2Doc },
}

impl ApiDocument {
    /// Discriminate the dialect by its version field and deserialize it
    pub fn from_value(value: Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(ManifestError::InvalidSpec);
        };

        if let Some(version) = object.get("openapi") {
            let version = scalar_to_string(version);
            let doc = serde_json::from_value(value)
                .map_err(|e| ManifestError::InvalidJson(format!("malformed OpenAPI 3 document: {e}")))?;
            Ok(ApiDocument::OpenApi3 { version, doc })
        } else if let Some(version) = object.get("swagger") {
            let version = scalar_to_string(version);
            let doc = serde_json::from_value(value)
                .map_err(|e| ManifestError::InvalidJson(format!("malformed Swagger 2 document: {e}")))?;
            Ok(ApiDocument::Swagger2 { version, doc })
        } else {
            Err(ManifestError::InvalidSpec)
        }
    }

    /// Dialect version string, e.g. "3.0.0" or "2.0"
    pub fn spec_version(&self) -> &str {
        match self {
            ApiDocument::OpenApi3 { version, .. } | ApiDocument::Swagger2 { version, .. } => version,
        }
    }

    pub fn info(&self) -> &Info {
        match self {
            ApiDocument::OpenApi3 { doc, .. } => &doc.info,
            ApiDocument::Swagger2 { doc, .. } => &doc.info,
        }
    }
}

/// OpenAPI 3.x document root
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApi3Doc {
    #[serde(default)]
    pub info: Info,

    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Option<Components>,
}

/// Swagger 2.0 document root
#[derive(Debug, Clone, Deserialize)]
pub struct Swagger2Doc {
    #[serde(default)]
    pub info: Info,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(rename = "basePath", default)]
    pub base_path: Option<String>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub definitions: IndexMap<String, Schema>,

    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(rename = "securityDefinitions", default)]
    pub security_definitions: IndexMap<String, SecurityScheme>,
}

/// API information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    /// YAML documents often carry unquoted numeric versions (`version: 1.0`)
    #[serde(default, deserialize_with = "lossy_string")]
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Server information
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Operations for a path
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    /// Parameters shared by every operation on this path
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,

    /// OpenAPI 3 only; Swagger 2 uses an `in: body` parameter
    #[serde(rename = "requestBody", default)]
    pub request_body: Option<RefOr<RequestBody>>,
}

/// Either an inline object or a `$ref` to a reusable one
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Item(T),
}

/// Parameter definition (shared by both dialects)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: query, header, path, cookie, body (Swagger 2), formData (Swagger 2)
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// OpenAPI 3 parameters and Swagger 2 body parameters
    #[serde(default)]
    pub schema: Option<Schema>,

    /// Swagger 2 non-body parameters carry the type inline
    #[serde(rename = "type", default)]
    pub param_type: Option<String>,

    #[serde(default)]
    pub format: Option<String>,
}

/// Request body (OpenAPI 3)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Media type
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// `type` is a single name in 3.0/2.0 and may be a list in 3.1
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    /// The first non-null type name
    pub fn primary(&self) -> Option<&str> {
        match self {
            SchemaType::Single(name) => Some(name.as_str()),
            SchemaType::Multiple(names) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
    }
}

/// Schema definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default)]
    pub schema_type: Option<SchemaType>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// 3.1 allows `true`/`false` in place of a property schema
    #[serde(default, deserialize_with = "schema_map")]
    pub properties: IndexMap<String, Schema>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default, deserialize_with = "optional_schema")]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "$ref", default)]
    pub ref_path: Option<String>,
}

impl Schema {
    pub fn type_name(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(SchemaType::primary)
    }
}

/// Reusable components (OpenAPI 3)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,

    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(rename = "requestBodies", default)]
    pub request_bodies: IndexMap<String, RequestBody>,

    #[serde(rename = "securitySchemes", default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// Security scheme (`components.securitySchemes` / `securityDefinitions`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityScheme {
    /// apiKey, http, oauth2, openIdConnect (3.x); apiKey, basic, oauth2 (2.0)
    #[serde(rename = "type", default)]
    pub scheme_type: String,

    /// HTTP auth scheme for `type: http` (bearer, basic, ...)
    #[serde(default)]
    pub scheme: Option<String>,

    /// Header, query or cookie name for `type: apiKey`
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "in", default)]
    pub location: Option<String>,

    /// OpenAPI 3 OAuth2 flows keyed by flow name
    #[serde(default)]
    pub flows: IndexMap<String, Value>,

    /// Swagger 2 OAuth2 flow: implicit, password, application, accessCode
    #[serde(default)]
    pub flow: Option<String>,
}

/// A JSON Schema may be a boolean: `true` accepts anything, `false` nothing.
/// Both carry no type information, so they read as an untyped schema.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaOrBool {
    Bool(bool),
    Schema(Box<Schema>),
}

impl SchemaOrBool {
    fn into_schema(self) -> Box<Schema> {
        match self {
            SchemaOrBool::Bool(_) => Box::default(),
            SchemaOrBool::Schema(schema) => schema,
        }
    }
}

fn schema_map<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, Schema>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = IndexMap::<String, SchemaOrBool>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|(name, schema)| (name, *schema.into_schema()))
        .collect())
}

fn optional_schema<'de, D>(deserializer: D) -> std::result::Result<Option<Box<Schema>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SchemaOrBool>::deserialize(deserializer)?.map(SchemaOrBool::into_schema))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lossy_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}
