//! Integration tests for the HTTP enrichment collaborators.
//!
//! Uses wiremock for HTTP mocking.

use std::time::Duration;

use pwa_report_core::{
    FetchError, HttpManifestFetcher, HttpServiceWorkerAnalyzer, ManifestFetcher,
    ServiceWorkerAnalyzer,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpManifestFetcher {
    HttpManifestFetcher::new(Duration::from_secs(5)).expect("failed to create fetcher")
}

fn analyzer(max_imports: usize) -> HttpServiceWorkerAnalyzer {
    HttpServiceWorkerAnalyzer::new(Duration::from_secs(5), max_imports)
        .expect("failed to create analyzer")
}

async fn serve(server: &MockServer, at: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_manifest_success() {
    let server = MockServer::start().await;
    let body = r#"{"name": "X", "display": "standalone"}"#;
    serve(&server, "/manifest.json", 200, body).await;

    let doc = fetcher()
        .fetch(
            &format!("{}/manifest.json", server.uri()),
            &format!("{}/", server.uri()),
        )
        .await
        .expect("fetch failed");

    assert_eq!(doc.raw, body);
    assert_eq!(doc.json, json!({"name": "X", "display": "standalone"}));
}

#[tokio::test]
async fn test_fetch_manifest_relative_to_page() {
    let server = MockServer::start().await;
    serve(&server, "/app/site.webmanifest", 200, r#"{"name": "Y"}"#).await;

    let doc = fetcher()
        .fetch("site.webmanifest", &format!("{}/app/index.html", server.uri()))
        .await
        .expect("fetch failed");

    assert_eq!(doc.json["name"], "Y");
}

#[tokio::test]
async fn test_fetch_manifest_not_found() {
    let server = MockServer::start().await;
    serve(&server, "/manifest.json", 404, "").await;

    let result = fetcher()
        .fetch(&format!("{}/manifest.json", server.uri()), &server.uri())
        .await;

    assert!(matches!(result, Err(FetchError::Http { status: 404, .. })));
}

#[tokio::test]
async fn test_fetch_manifest_empty_and_invalid() {
    let server = MockServer::start().await;
    serve(&server, "/empty.json", 200, "  \n").await;
    serve(&server, "/html.json", 200, "<!doctype html><html></html>").await;
    serve(&server, "/array.json", 200, "[1, 2]").await;

    let f = fetcher();
    let empty = f
        .fetch(&format!("{}/empty.json", server.uri()), &server.uri())
        .await;
    assert!(matches!(empty, Err(FetchError::Empty { .. })));

    let html = f
        .fetch(&format!("{}/html.json", server.uri()), &server.uri())
        .await;
    assert!(matches!(html, Err(FetchError::Parse { .. })));

    let array = f
        .fetch(&format!("{}/array.json", server.uri()), &server.uri())
        .await;
    assert!(matches!(array, Err(FetchError::Parse { .. })));
}

#[tokio::test]
async fn test_fetch_manifest_with_bom() {
    let server = MockServer::start().await;
    serve(&server, "/manifest.json", 200, "\u{feff}{\"name\": \"Z\"}").await;

    let doc = fetcher()
        .fetch(&format!("{}/manifest.json", server.uri()), &server.uri())
        .await
        .expect("fetch failed");
    assert_eq!(doc.json["name"], "Z");
}

#[tokio::test]
async fn test_analyze_service_worker_with_imports() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/sw.js",
        200,
        "importScripts('lib/push.js', '/missing.js');\nself.addEventListener('fetch', e => {});",
    )
    .await;
    serve(
        &server,
        "/lib/push.js",
        200,
        "self.addEventListener('push', e => {});",
    )
    .await;
    serve(&server, "/missing.js", 404, "").await;

    let analysis = analyzer(10)
        .analyze(&format!("{}/sw.js", server.uri()))
        .await
        .expect("analyze failed");

    assert_eq!(analysis.raw.len(), 2);
    assert!(analysis.raw[0].starts_with("importScripts"));
    assert!(analysis.features.detected_signs_of_logic);
    assert!(analysis.features.detected_push_registration);
    assert!(!analysis.features.detected_background_sync);
    assert!(!analysis.features.detected_empty);
}

#[tokio::test]
async fn test_analyze_respects_import_limit() {
    let server = MockServer::start().await;
    serve(&server, "/sw.js", 200, "importScripts('a.js', 'b.js');").await;
    serve(&server, "/a.js", 200, "// a").await;
    serve(&server, "/b.js", 200, "// b").await;

    let analysis = analyzer(1)
        .analyze(&format!("{}/sw.js", server.uri()))
        .await
        .expect("analyze failed");

    assert_eq!(analysis.raw, vec!["importScripts('a.js', 'b.js');", "// a"]);
}

#[tokio::test]
async fn test_analyze_service_worker_server_error() {
    let server = MockServer::start().await;
    serve(&server, "/sw.js", 500, "boom").await;

    let result = analyzer(10)
        .analyze(&format!("{}/sw.js", server.uri()))
        .await;

    assert!(matches!(result, Err(FetchError::Http { status: 500, .. })));
}

#[tokio::test]
async fn test_analyze_rejects_relative_script_url() {
    let result = analyzer(10).analyze("sw.js").await;
    assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
}
