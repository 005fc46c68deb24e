//! Router tests against the in-memory store and a fake resolver
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use shorturl_api::{
    create_router,
    dns::{HostLookup, LookupError},
    AppState, Config,
};
use shorturl_shared::{MemoryUrlStore, ShortUrlRecord, StoreError, StoreResult, UrlStore};
use tower::ServiceExt;

/// Resolves every host except those under `.invalid`
struct FakeLookup;

#[async_trait]
impl HostLookup for FakeLookup {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        if host.ends_with(".invalid") {
            Err(LookupError::NoAddress(host.to_string()))
        } else {
            Ok(vec![IpAddr::V4(Ipv4Addr::new(104, 26, 2, 33))])
        }
    }
}

/// Store whose every operation fails
struct BrokenStore;

#[async_trait]
impl UrlStore for BrokenStore {
    async fn find_by_original(&self, _: &str) -> StoreResult<Option<ShortUrlRecord>> {
        Err(StoreError::Database("connection refused".into()))
    }
    async fn find_by_short(&self, _: i64) -> StoreResult<Option<ShortUrlRecord>> {
        Err(StoreError::Database("connection refused".into()))
    }
    async fn allocate_and_create(&self, _: &str) -> StoreResult<ShortUrlRecord> {
        Err(StoreError::Database("connection refused".into()))
    }
    async fn health_check(&self) -> StoreResult<()> {
        Err(StoreError::Database("connection refused".into()))
    }
}

fn test_config() -> Config {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
    Config {
        static_dir: root.join("public"),
        views_dir: root.join("views"),
        ..Config::in_memory()
    }
}

fn app_with_store(store: Arc<dyn UrlStore>) -> Router {
    create_router(AppState::new(test_config(), store, Arc::new(FakeLookup)))
}

fn app() -> Router {
    app_with_store(Arc::new(MemoryUrlStore::new()))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &Router, body: Value) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/api/shorturl")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

async fn post_form(app: &Router, body: &'static str) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/api/shorturl")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_freecodecamp_scenario() {
    let app = app();
    let expected = json!({ "original_url": "http://freecodecamp.org/", "short_url": 1 });

    assert_eq!(post_json(&app, json!({ "url": "freeCodeCamp.org" })).await, expected);
    assert_eq!(post_json(&app, json!({ "url": "freeCodeCamp.org" })).await, expected);

    let response = get(&app, "/api/shorturl/1").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "http://freecodecamp.org/"
    );

    let response = get(&app, "/api/shorturl/9999").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "error": "invalid url" }));
}

#[tokio::test]
async fn test_form_submission() {
    let app = app();
    let body = post_form(&app, "url=https%3A%2F%2Fexample.com%2Fdocs%3Fpage%3D2").await;
    assert_eq!(
        body,
        json!({ "original_url": "https://example.com/docs?page=2", "short_url": 1 })
    );
}

#[tokio::test]
async fn test_distinct_urls_get_increasing_ids() {
    let app = app();
    let first = post_json(&app, json!({ "url": "https://a.example.com" })).await;
    let second = post_json(&app, json!({ "url": "https://b.example.com" })).await;
    let third = post_form(&app, "url=c.example.com").await;

    assert_eq!(first["short_url"], 1);
    assert_eq!(second["short_url"], 2);
    assert_eq!(third["short_url"], 3);
}

#[tokio::test]
async fn test_missing_scheme_is_same_as_http() {
    let app = app();
    let bare = post_json(&app, json!({ "url": "example.org/path" })).await;
    let explicit = post_json(&app, json!({ "url": "http://example.org/path" })).await;

    assert_eq!(bare, explicit);
    assert_eq!(bare["original_url"], "http://example.org/path");
}

#[tokio::test]
async fn test_unresolvable_host() {
    let app = app();
    let body = post_json(&app, json!({ "url": "https://does-not-exist.invalid" })).await;
    assert_eq!(body, json!({ "error": "invalid url, address doesn't exist" }));
}

#[tokio::test]
async fn test_invalid_submissions() {
    let app = app();
    let invalid = json!({ "error": "invalid url" });

    assert_eq!(post_json(&app, json!({ "url": "http://exa mple.com" })).await, invalid);
    assert_eq!(post_json(&app, json!({ "url": "" })).await, invalid);
    assert_eq!(post_json(&app, json!({ "url": 42 })).await, invalid);
    assert_eq!(post_json(&app, json!({})).await, invalid);
    assert_eq!(post_form(&app, "other=field").await, invalid);

    // Undecodable JSON
    let request = Request::builder()
        .method("POST")
        .uri("/api/shorturl")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, invalid);
}

#[tokio::test]
async fn test_lookup_of_unknown_or_non_numeric_id() {
    let app = app();
    for uri in ["/api/shorturl/1", "/api/shorturl/abc", "/api/shorturl/-1"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        assert_eq!(json_body(response).await, json!({ "error": "invalid url" }));
    }
}

#[tokio::test]
async fn test_redirect_targets_stored_url() {
    let app = app();
    post_json(&app, json!({ "url": "https://example.com/a" })).await;
    let created = post_json(&app, json!({ "url": "https://example.com/b?x=1#top" })).await;
    assert_eq!(created["short_url"], 2);

    let response = get(&app, "/api/shorturl/2").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/b?x=1#top"
    );
}

#[tokio::test]
async fn test_concurrent_creations_get_distinct_ids() {
    let app = app();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                post_json(&app, json!({ "url": format!("https://host{}.example.com", i) })).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap()["short_url"].as_i64().unwrap());
    }
    ids.sort_unstable();

    assert_eq!(ids, (1..=16).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_store_failure_is_reported_as_invalid_url() {
    let app = app_with_store(Arc::new(BrokenStore));

    assert_eq!(
        post_json(&app, json!({ "url": "example.com" })).await,
        json!({ "error": "invalid url" })
    );

    let response = get(&app, "/api/shorturl/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "error": "invalid url" }));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "healthy");

    assert_eq!(get(&app, "/health/live").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/health/ready").await.status(), StatusCode::OK);

    let broken = app_with_store(Arc::new(BrokenStore));
    let response = get(&broken, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"], "unhealthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(get(&broken, "/health/live").await.status(), StatusCode::OK);
    assert_eq!(
        get(&broken, "/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_static_pages() {
    let app = app();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/api/shorturl"));

    assert_eq!(get(&app, "/public/style.css").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/public/missing.css").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app();
    let request = Request::builder()
        .uri("/api/shorturl/1")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
