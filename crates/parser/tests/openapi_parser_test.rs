//! Integration tests for the OpenAPI / Swagger importer

use provider_manifest_common::{validate, AuthType, FieldType, ManifestError, ProviderManifest};
use provider_manifest_parser::{import_from_str, OpenApiParser, SpecEncoding};

#[test]
fn test_petstore_end_to_end() {
    let spec = r##"{
        "openapi": "3.0.0",
        "info": {
            "title": "Pet Store",
            "version": "1.0.0",
            "description": "A sample pet store"
        },
        "servers": [{"url": "https://petstore.example.com/v1"}],
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "summary": "List all pets",
                    "tags": ["pets"],
                    "parameters": [
                        {
                            "name": "limit",
                            "in": "query",
                            "description": "How many items to return",
                            "schema": {"type": "integer", "format": "int32"}
                        }
                    ]
                }
            }
        }
    }"##;

    let imported = OpenApiParser::from_json(spec).unwrap().parse();

    assert_eq!(imported.name, "Pet Store");
    assert_eq!(imported.description, "A sample pet store");
    assert_eq!(imported.version, "1.0.0");
    assert_eq!(imported.base_url.as_deref(), Some("https://petstore.example.com/v1"));

    // No security schemes: a single api_key field is synthesized
    assert_eq!(imported.auth_type, AuthType::ApiKey);
    assert_eq!(imported.auth_fields.len(), 1);
    assert_eq!(imported.auth_fields[0].name, "api_key");

    assert_eq!(imported.actions.len(), 1);
    let action = &imported.actions[0];
    assert_eq!(action.id, "listpets");
    assert_eq!(action.name, "List all pets");
    assert_eq!(action.description, "List all pets");
    assert_eq!(action.category.as_deref(), Some("pets"));
    assert!(action.is_idempotent);

    assert_eq!(action.inputs.len(), 1);
    assert_eq!(action.inputs[0].name, "limit");
    assert_eq!(action.inputs[0].label, "Limit");
    assert_eq!(action.inputs[0].field_type, FieldType::Integer);
    assert!(!action.inputs[0].required);

    assert_eq!(action.outputs.len(), 1);
    assert_eq!(action.outputs[0].name, "response");
    assert_eq!(action.outputs[0].field_type, FieldType::Object);

    let manifest = imported.into_manifest();
    assert_eq!(manifest.id, "pet-store");
    assert!(validate(&manifest).is_empty());
}

#[test]
fn test_basic_auth_scheme() {
    let spec = r#"{
        "openapi": "3.0.3",
        "info": {"title": "Basic API", "version": "2.1.0"},
        "paths": {},
        "components": {
            "securitySchemes": {
                "basicAuth": {"type": "http", "scheme": "basic"}
            }
        }
    }"#;

    let imported = OpenApiParser::from_json(spec).unwrap().parse();
    assert_eq!(imported.auth_type, AuthType::Basic);
    let names: Vec<&str> = imported.auth_fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["username", "password"]);
    assert!(!imported.auth_fields[0].secret);
    assert!(imported.auth_fields[1].secret);
    assert!(imported.base_url.is_none());
}

#[test]
fn test_oauth2_client_credentials() {
    let spec = r#"{
        "openapi": "3.0.0",
        "info": {"title": "Machine API", "version": "1"},
        "paths": {},
        "components": {
            "securitySchemes": {
                "oauth": {
                    "type": "oauth2",
                    "flows": {
                        "clientCredentials": {
                            "tokenUrl": "https://auth.example.com/token",
                            "scopes": {}
                        }
                    }
                }
            }
        }
    }"#;

    let imported = OpenApiParser::from_json(spec).unwrap().parse();
    assert_eq!(imported.auth_type, AuthType::Oauth2ClientCredentials);
    assert_eq!(imported.auth_fields.len(), 2);
    assert_eq!(imported.auth_fields[0].name, "client_id");
}

#[test]
fn test_swagger_host_and_base_path() {
    let spec = r##"{
        "swagger": "2.0",
        "info": {"title": "Legacy Hosts", "version": "0.9"},
        "host": "legacy.example.com",
        "basePath": "/api",
        "schemes": ["http"],
        "securityDefinitions": {
            "key": {"type": "apiKey", "name": "X-API-Key", "in": "header"}
        },
        "paths": {
            "/hosts": {
                "post": {
                    "operationId": "createHost",
                    "parameters": [
                        {
                            "name": "body",
                            "in": "body",
                            "required": true,
                            "schema": {"$ref": "#/definitions/Host"}
                        }
                    ]
                }
            },
            "/api/v1/hosts/{id}": {
                "get": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true, "type": "string"}
                    ]
                },
                "delete": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true, "type": "string"}
                    ]
                }
            }
        },
        "definitions": {
            "Host": {
                "type": "object",
                "required": ["hostname"],
                "properties": {
                    "hostname": {"type": "string", "description": "Fully qualified name"},
                    "adminPassword": {"type": "string", "format": "password"},
                    "port": {"type": "integer"}
                }
            }
        }
    }"##;

    let imported = OpenApiParser::from_json(spec).unwrap().parse();

    assert_eq!(imported.base_url.as_deref(), Some("https://legacy.example.com/api"));
    assert_eq!(imported.auth_type, AuthType::ApiKey);
    assert_eq!(imported.auth_fields[0].name, "x_api_key");

    // Paths follow the document, not alphabetical order
    let ids: Vec<&str> = imported.actions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["createhost", "get_hosts_by_id", "delete_hosts_by_id"]);

    let create = &imported.actions[0];
    assert!(!create.is_idempotent);
    let names: Vec<&str> = create.inputs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["hostname", "admin_password", "port"]);
    assert!(create.inputs[0].required);
    assert_eq!(create.inputs[0].description, "Fully qualified name");
    assert!(create.inputs[1].secret);
    assert_eq!(create.inputs[1].field_type, FieldType::Password);
    assert!(!create.inputs[1].required);

    let get = &imported.actions[1];
    assert!(get.is_idempotent);
    assert_eq!(get.inputs[0].name, "id");
    assert!(get.inputs[0].required);

    assert!(imported.actions[2].is_idempotent);
}

#[test]
fn test_last_declared_scheme_decides_auth_type() {
    let spec = r#"{
        "openapi": "3.0.0",
        "info": {"title": "Ordered", "version": "1.0.0"},
        "components": {
            "securitySchemes": {
                "tokenAuth": {"type": "http", "scheme": "bearer"},
                "appKey": {"type": "apiKey", "name": "X-Key", "in": "header"}
            }
        },
        "paths": {}
    }"#;

    let imported = OpenApiParser::from_json(spec).unwrap().parse();

    assert_eq!(imported.auth_type, AuthType::ApiKey);
    let names: Vec<&str> = imported.auth_fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["access_token", "x_key"]);
}

#[test]
fn test_actions_follow_path_declaration_order() {
    let spec = r#"
openapi: 3.0.0
info:
  title: Zoo
  version: 1.0.0
paths:
  /zebras:
    get: {}
  /apples:
    get: {}
    post: {}
"#;

    let imported = OpenApiParser::from_yaml(spec).unwrap().parse();

    let ids: Vec<&str> = imported.actions.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["get_zebras", "get_apples", "create_apples"]);
}

#[test]
fn test_boolean_property_schema_accepted() {
    let spec = r#"{
        "openapi": "3.1.0",
        "info": {"title": "Flags", "version": "1.0.0"},
        "paths": {
            "/flags": {
                "post": {
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "label": {"type": ["string", "null"]},
                                        "anything": true
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }"#;

    let imported = OpenApiParser::from_json(spec).unwrap().parse();

    let inputs = &imported.actions[0].inputs;
    let names: Vec<&str> = inputs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["label", "anything"]);
    assert_eq!(inputs[0].field_type, FieldType::String);
}

#[test]
fn test_yaml_spec() {
    let spec = r#"
openapi: 3.0.0
info:
  title: YAML Service
  version: 3.2.1
servers:
  - url: https://yaml.example.com
paths:
  /items/{itemId}:
    put:
      summary: Replace an item
      parameters:
        - name: itemId
          in: path
          schema:
            type: string
"#;

    let imported = import_from_str(spec, SpecEncoding::Yaml).unwrap();
    assert_eq!(imported.name, "YAML Service");
    assert_eq!(imported.actions[0].id, "update_items_by_itemid");
    assert_eq!(imported.actions[0].inputs[0].name, "item_id");
    assert!(imported.actions[0].inputs[0].required);
}

#[test]
fn test_missing_version_field() {
    let err = OpenApiParser::from_json(r#"{"info": {"title": "Nope"}, "paths": {}}"#)
        .err()
        .unwrap();
    assert!(matches!(err, ManifestError::InvalidSpec));
    assert_eq!(
        err.to_string(),
        "Invalid OpenAPI/Swagger spec: missing 'openapi' or 'swagger' version field"
    );
}

#[test]
fn test_apply_to_keeps_existing_identity() {
    let spec = r#"{
        "openapi": "3.0.0",
        "info": {"title": "Renamed API", "version": "4.0.0"},
        "paths": {}
    }"#;
    let imported = OpenApiParser::from_json(spec).unwrap().parse();

    let mut existing = ProviderManifest::new("my-provider", "My Provider");
    existing.tags = vec!["internal".to_string()];

    let merged = imported.apply_to(&existing);
    assert_eq!(merged.id, "my-provider");
    assert_eq!(merged.name, "Renamed API");
    assert_eq!(merged.version, "4.0.0");
    assert_eq!(merged.tags, vec!["internal".to_string()]);
    // The input manifest is untouched
    assert_eq!(existing.name, "My Provider");
}
