//! Registry client tests against a local mock server

use provider_manifest_common::{ManifestError, ProviderManifest};
use provider_manifest_generator::{load_manifest, ManifestClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_save_posts_rendered_yaml() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/providers"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let manifest = ProviderManifest::new("zendesk", "Zendesk");
    let client = ManifestClient::new(server.uri());
    client.save(&manifest).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let yaml = body["manifest_yaml"].as_str().unwrap();
    assert_eq!(load_manifest(yaml).unwrap(), manifest);
}

#[tokio::test]
async fn test_server_error_becomes_save_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/providers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let client = ManifestClient::new(format!("{}/", server.uri()));
    let err = client
        .save(&ProviderManifest::new("x", "X"))
        .await
        .unwrap_err();

    assert!(matches!(err, ManifestError::Save(_)));
    let message = err.to_string();
    assert!(message.starts_with("Failed to save provider manifest: 500"));
    assert!(message.contains("database unavailable"));
}

#[tokio::test]
async fn test_unreachable_registry() {
    let client = ManifestClient::new("http://127.0.0.1:9");
    let err = client
        .save(&ProviderManifest::new("x", "X"))
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::Save(_)));
}
