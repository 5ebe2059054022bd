//! Normalizes both dialects into one canonical representation
//!
//! Everything dialect-specific happens here: server/host resolution,
//! `$ref` lookups, Swagger `in: body` lifting and path-level parameter
//! merging. The converter only ever sees a `NormalizedSpec`.

use super::types::{
    ApiDocument, Components, OpenApi3Doc, Operation, Parameter, PathItem, RefOr, RequestBody,
    Schema, SecurityScheme, Swagger2Doc,
};
use crate::operation_mapper::HttpMethod;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Maximum `$ref` hops followed before giving up on a cyclic reference
const MAX_REF_DEPTH: usize = 8;

/// Dialect-independent view of an API description
#[derive(Debug, Clone, Default)]
pub struct NormalizedSpec {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub base_url: Option<String>,
    /// Security schemes keyed by scheme name, in declaration order
    pub security_schemes: Vec<(String, SecurityScheme)>,
    /// Operations in path declaration order, then in `HttpMethod::ALL` order
    pub operations: Vec<NormalizedOperation>,
}

/// One `(path, method)` pair with references resolved
#[derive(Debug, Clone)]
pub struct NormalizedOperation {
    pub path: String,
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<NormalizedParameter>,
    pub body: Option<NormalizedBody>,
}

/// A non-body parameter with its type resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedParameter {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub required: bool,
    pub type_name: Option<String>,
    pub format: Option<String>,
}

/// Top-level properties of a JSON request body
#[derive(Debug, Clone, Default)]
pub struct NormalizedBody {
    pub required: bool,
    /// Names listed in the body schema's `required` array
    pub required_properties: Vec<String>,
    pub properties: Vec<(String, Schema)>,
}

/// Where `$ref` targets live for the dialect being normalized
struct RefScope<'a> {
    schemas: &'a IndexMap<String, Schema>,
    schema_prefix: &'static str,
    parameters: &'a IndexMap<String, Parameter>,
    parameter_prefix: &'static str,
    request_bodies: Option<&'a IndexMap<String, RequestBody>>,
}

impl RefScope<'_> {
    fn resolve_schema<'s>(&'s self, schema: &'s Schema) -> Option<&'s Schema> {
        let mut current = schema;
        for _ in 0..MAX_REF_DEPTH {
            let Some(ref_path) = current.ref_path.as_deref() else {
                return Some(current);
            };
            let name = ref_path.strip_prefix(self.schema_prefix)?;
            current = match self.schemas.get(name) {
                Some(target) => target,
                None => {
                    warn!(ref_path, "unresolved schema reference");
                    return None;
                }
            };
        }
        warn!("schema reference chain too deep, treating as untyped");
        None
    }

    fn resolve_parameter<'s>(&'s self, param: &'s RefOr<Parameter>) -> Option<&'s Parameter> {
        match param {
            RefOr::Item(param) => Some(param),
            RefOr::Reference { ref_path } => {
                let resolved = ref_path
                    .strip_prefix(self.parameter_prefix)
                    .and_then(|name| self.parameters.get(name));
                if resolved.is_none() {
                    warn!(ref_path = ref_path.as_str(), "unresolved parameter reference");
                }
                resolved
            }
        }
    }

    fn resolve_request_body<'s>(
        &'s self,
        body: &'s RefOr<RequestBody>,
    ) -> Option<&'s RequestBody> {
        match body {
            RefOr::Item(body) => Some(body),
            RefOr::Reference { ref_path } => {
                let resolved = ref_path
                    .strip_prefix("#/components/requestBodies/")
                    .and_then(|name| self.request_bodies?.get(name));
                if resolved.is_none() {
                    warn!(ref_path = ref_path.as_str(), "unresolved request body reference");
                }
                resolved
            }
        }
    }

    /// Flatten an object schema into its top-level properties
    fn body_from_schema(&self, schema: &Schema, required: bool) -> NormalizedBody {
        let Some(schema) = self.resolve_schema(schema) else {
            return NormalizedBody {
                required,
                ..Default::default()
            };
        };

        let properties = schema
            .properties
            .iter()
            .map(|(name, prop)| {
                let resolved = self.resolve_schema(prop).cloned().unwrap_or_default();
                (name.clone(), merge_description(resolved, prop))
            })
            .collect();

        NormalizedBody {
            required,
            required_properties: schema.required.clone(),
            properties,
        }
    }

    fn normalize_parameter(&self, param: &Parameter) -> NormalizedParameter {
        // OpenAPI 3 puts the type in `schema`; Swagger 2 puts it inline
        let schema = param.schema.as_ref().and_then(|s| self.resolve_schema(s));
        let type_name = schema
            .and_then(Schema::type_name)
            .map(str::to_string)
            .or_else(|| param.param_type.clone());
        let format = schema
            .and_then(|s| s.format.clone())
            .or_else(|| param.format.clone());

        NormalizedParameter {
            name: param.name.clone(),
            location: param.location.clone(),
            description: param.description.clone(),
            required: param.required,
            type_name,
            format,
        }
    }
}

/// A `$ref`'d property keeps the description written next to the reference
fn merge_description(mut resolved: Schema, original: &Schema) -> Schema {
    if original.description.is_some() {
        resolved.description = original.description.clone();
    }
    resolved
}

/// Normalize either dialect
pub fn normalize(document: &ApiDocument) -> NormalizedSpec {
    match document {
        ApiDocument::OpenApi3 { doc, .. } => normalize_openapi3(doc),
        ApiDocument::Swagger2 { doc, .. } => normalize_swagger2(doc),
    }
}

fn normalize_openapi3(doc: &OpenApi3Doc) -> NormalizedSpec {
    let empty = Components::default();
    let components = doc.components.as_ref().unwrap_or(&empty);
    let scope = RefScope {
        schemas: &components.schemas,
        schema_prefix: "#/components/schemas/",
        parameters: &components.parameters,
        parameter_prefix: "#/components/parameters/",
        request_bodies: Some(&components.request_bodies),
    };

    let base_url = doc
        .servers
        .first()
        .map(|server| server.url.clone())
        .filter(|url| !url.is_empty());

    let operations = collect_operations(&doc.paths, |path, method, item, op| {
        let mut normalized = base_operation(&scope, path, method, item, op);
        if method.accepts_body() {
            normalized.body = op
                .request_body
                .as_ref()
                .and_then(|body| scope.resolve_request_body(body))
                .and_then(|body| {
                    json_media_schema(body).map(|schema| scope.body_from_schema(schema, body.required))
                });
        }
        normalized
    });

    NormalizedSpec {
        title: doc.info.title.clone(),
        description: doc.info.description.clone(),
        version: doc.info.version.clone(),
        base_url,
        security_schemes: components
            .security_schemes
            .iter()
            .map(|(name, scheme)| (name.clone(), scheme.clone()))
            .collect(),
        operations,
    }
}

fn normalize_swagger2(doc: &Swagger2Doc) -> NormalizedSpec {
    let scope = RefScope {
        schemas: &doc.definitions,
        schema_prefix: "#/definitions/",
        parameters: &doc.parameters,
        parameter_prefix: "#/parameters/",
        request_bodies: None,
    };

    let base_url = doc
        .host
        .as_deref()
        .filter(|host| !host.is_empty())
        .map(|host| format!("https://{}{}", host, doc.base_path.as_deref().unwrap_or("")));

    let operations = collect_operations(&doc.paths, |path, method, item, op| {
        let mut normalized = base_operation(&scope, path, method, item, op);
        // `in: body` parameters become the request body
        let body_param = merged_parameters(&scope, item, op)
            .into_iter()
            .find(|p| p.location == "body");
        if method.accepts_body() {
            normalized.body = body_param.map(|param| match param.schema.as_ref() {
                Some(schema) => scope.body_from_schema(schema, param.required),
                None => NormalizedBody {
                    required: param.required,
                    ..Default::default()
                },
            });
        }
        normalized
    });

    NormalizedSpec {
        title: doc.info.title.clone(),
        description: doc.info.description.clone(),
        version: doc.info.version.clone(),
        base_url,
        security_schemes: doc
            .security_definitions
            .iter()
            .map(|(name, scheme)| (name.clone(), scheme.clone()))
            .collect(),
        operations,
    }
}

fn collect_operations<F>(
    paths: &IndexMap<String, PathItem>,
    mut build: F,
) -> Vec<NormalizedOperation>
where
    F: FnMut(&str, HttpMethod, &PathItem, &Operation) -> NormalizedOperation,
{
    let mut operations = Vec::new();
    for (path, item) in paths {
        for method in HttpMethod::ALL {
            if let Some(op) = operation_for(item, method) {
                operations.push(build(path, method, item, op));
            }
        }
    }
    debug!(count = operations.len(), "collected operations");
    operations
}

fn operation_for(item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
    }
}

fn base_operation(
    scope: &RefScope<'_>,
    path: &str,
    method: HttpMethod,
    item: &PathItem,
    op: &Operation,
) -> NormalizedOperation {
    let parameters = merged_parameters(scope, item, op)
        .into_iter()
        .filter(|p| p.location != "body")
        .map(|p| scope.normalize_parameter(p))
        .collect();

    NormalizedOperation {
        path: path.to_string(),
        method,
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        parameters,
        body: None,
    }
}

/// Path-level parameters followed by operation-level ones; an operation
/// parameter replaces a path parameter with the same name and location
fn merged_parameters<'s>(
    scope: &'s RefScope<'_>,
    item: &'s PathItem,
    op: &'s Operation,
) -> Vec<&'s Parameter> {
    let own: Vec<&Parameter> = op
        .parameters
        .iter()
        .filter_map(|p| scope.resolve_parameter(p))
        .collect();

    let mut merged: Vec<&Parameter> = item
        .parameters
        .iter()
        .filter_map(|p| scope.resolve_parameter(p))
        .filter(|shared| {
            !own.iter()
                .any(|p| p.name == shared.name && p.location == shared.location)
        })
        .collect();
    merged.extend(own);
    merged
}

/// The `application/json` schema, or any other JSON media type
fn json_media_schema(body: &RequestBody) -> Option<&Schema> {
    body.content
        .get("application/json")
        .or_else(|| {
            body.content
                .iter()
                .find(|(media, _)| media.contains("json"))
                .map(|(_, media_type)| media_type)
        })
        .and_then(|media_type| media_type.schema.as_ref())
}
