//! HTTP retrieval tests against a local mock server

use provider_manifest_common::ManifestError;
use provider_manifest_parser::{import_from_url, FetchAuth, HttpSpecSource, SpecSource};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPEC: &str = r#"{
    "openapi": "3.0.0",
    "info": {"title": "Remote API", "version": "1.2.3"},
    "paths": {
        "/widgets": {"post": {"summary": "Make a widget"}}
    }
}"#;

#[tokio::test]
async fn test_fetch_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SPEC))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/openapi.json", server.uri());
    let imported = import_from_url(
        &url,
        FetchAuth::Bearer {
            token: "s3cret".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(imported.name, "Remote API");
    assert_eq!(imported.actions.len(), 1);
    assert_eq!(imported.actions[0].id, "create_widgets");
    assert_eq!(imported.actions[0].name, "Make a widget");
    assert!(!imported.actions[0].is_idempotent);
}

#[tokio::test]
async fn test_fetch_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SPEC))
        .expect(1)
        .mount(&server)
        .await;

    let auth = FetchAuth::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    };
    let imported = import_from_url(&server.uri(), auth).await.unwrap();
    assert_eq!(imported.version, "1.2.3");
}

#[tokio::test]
async fn test_fetch_with_custom_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("x-api-key", "k-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SPEC))
        .expect(1)
        .mount(&server)
        .await;

    let auth = FetchAuth::ApiKey {
        header: "X-API-Key".to_string(),
        value: "k-123".to_string(),
    };
    let source = HttpSpecSource::new(&server.uri(), auth).unwrap();
    let document = source.fetch().await.unwrap();
    assert!(document.body.contains("Remote API"));
}

#[tokio::test]
async fn test_not_found_maps_to_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing.json", server.uri());
    let err = import_from_url(&url, FetchAuth::None).await.unwrap_err();
    match &err {
        ManifestError::Fetch {
            status,
            status_text,
        } => {
            assert_eq!(*status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "Failed to fetch spec: 404 Not Found");
}

#[tokio::test]
async fn test_yaml_content_type() {
    let yaml = "swagger: '2.0'\ninfo:\n  title: YAML Remote\n  version: '1'\nhost: yaml.example.com\npaths: {}\n";

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spec"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(yaml, "application/yaml"))
        .mount(&server)
        .await;

    let url = format!("{}/spec", server.uri());
    let imported = import_from_url(&url, FetchAuth::None).await.unwrap();
    assert_eq!(imported.name, "YAML Remote");
    assert_eq!(imported.base_url.as_deref(), Some("https://yaml.example.com"));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Port 9 (discard) on localhost is not expected to serve HTTP
    let err = import_from_url("http://127.0.0.1:9/openapi.json", FetchAuth::None)
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::Network(_)));
}
