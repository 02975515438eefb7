//! Integration tests for the HTTP endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The FishWatch provider is a `wiremock` stub, so
//! every provider status and body shape can be staged.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use fishwatch_core::catalog::Catalog;
use fishwatch_core::config::FishwatchConfig;
use fishwatch_server::router::build_router;
use fishwatch_server::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_config(provider: &MockServer) -> FishwatchConfig {
    let mut config = FishwatchConfig::default();
    config.provider.base_url = provider.uri();
    config.provider.request_timeout_ms = 2000;
    config.view.image_hosts = Vec::new();
    config
}

fn make_state(config: &FishwatchConfig) -> Arc<AppState> {
    Arc::new(AppState::new(config, Arc::new(Catalog::fishwatch())).unwrap())
}

async fn stub_species(provider: &MockServer, key: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/api/species/{key}")))
        .respond_with(template)
        .expect(1)
        .mount(provider)
        .await;
}

fn provider_record(name: &str) -> Value {
    json!([{
        "Species Name": name,
        "Physical Description": "<p>Elongated body</p>",
        "Health Benefits": "<p>Low in fat</p>",
        "Image Gallery": [{ "src": "https://example/img.jpg", "alt": name }]
    }])
}

fn fish_request(body: impl Into<Body>) -> Request<Body> {
    Request::post("/api/fish")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =========================================================================
// POST /api/fish
// =========================================================================

#[tokio::test]
async fn test_every_catalog_key_maps_provider_fields() {
    for entry in Catalog::fishwatch().entries() {
        let provider = MockServer::start().await;
        stub_species(
            &provider,
            &entry.key,
            ResponseTemplate::new(200).set_body_json(provider_record(&entry.display_name)),
        )
        .await;
        let router = build_router(make_state(&make_config(&provider)));

        let body = json!({ "fish": entry.key }).to_string();
        let response = router.oneshot(fish_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", entry.key);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(
            json,
            json!({
                "speciesName": entry.display_name,
                "physicalDescription": "<p>Elongated body</p>",
                "healthBenefits": "<p>Low in fat</p>",
                "image": "https://example/img.jpg"
            })
        );
    }
}

#[tokio::test]
async fn test_missing_or_unusable_gallery_gives_null_image() {
    for record in [
        json!([{ "Species Name": "Red Snapper", "Physical Description": "", "Health Benefits": "" }]),
        json!([{ "Species Name": "Red Snapper", "Image Gallery": [] }]),
        json!([{ "Species Name": "Red Snapper", "Image Gallery": [{ "src": 5 }] }]),
        json!([{ "Species Name": "Red Snapper", "Image Gallery": "img.jpg" }]),
        json!([{ "Species Name": "Red Snapper", "Image Gallery": false }]),
    ] {
        let provider = MockServer::start().await;
        stub_species(
            &provider,
            "red-snapper",
            ResponseTemplate::new(200).set_body_json(record),
        )
        .await;
        let router = build_router(make_state(&make_config(&provider)));

        let response = router
            .oneshot(fish_request(r#"{"fish":"red-snapper"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_to_json(response.into_body()).await;
        assert!(json["image"].is_null());
        assert_eq!(json["speciesName"], "Red Snapper");
    }
}

#[tokio::test]
async fn test_provider_non_200_is_400_something_wrong() {
    for status in [204, 404, 500, 503] {
        let provider = MockServer::start().await;
        stub_species(&provider, "gag-grouper", ResponseTemplate::new(status)).await;
        let router = build_router(make_state(&make_config(&provider)));

        let response = router
            .oneshot(fish_request(r#"{"fish":"gag-grouper"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json, json!({ "error": "Something's wrong with FishWatch." }));
    }
}

#[tokio::test]
async fn test_provider_empty_array_is_400_no_data() {
    let provider = MockServer::start().await;
    stub_species(
        &provider,
        "vermilion-snapper",
        ResponseTemplate::new(200).set_body_json(json!([])),
    )
    .await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(fish_request(r#"{"fish":"vermilion-snapper"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, json!({ "error": "That fish doesn't have data." }));
}

#[tokio::test]
async fn test_provider_garbage_body_is_400_something_wrong() {
    let provider = MockServer::start().await;
    stub_species(
        &provider,
        "gag-grouper",
        ResponseTemplate::new(200).set_body_string("<html>down for maintenance</html>"),
    )
    .await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(fish_request(r#"{"fish":"gag-grouper"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Something's wrong with FishWatch.");
}

#[tokio::test]
async fn test_unreachable_provider_is_400_something_wrong() {
    // A port that was just released has nothing listening on it.
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = closed.local_addr().unwrap();
    drop(closed);
    let mut config = FishwatchConfig::default();
    config.provider.base_url = format!("http://{addr}");
    let router = build_router(make_state(&config));

    let response = router
        .oneshot(fish_request(r#"{"fish":"gag-grouper"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Something's wrong with FishWatch.");
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let provider = MockServer::start().await;
    let router = build_router(make_state(&make_config(&provider)));

    for body in ["not json", "{\"fish\": 7}", "{}", ""] {
        let response = router.clone().oneshot(fish_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body:?}");
        let json = body_to_json(response.into_body()).await;
        assert_eq!(json, json!({ "error": "Malformed request." }));
    }

    // No provider call was made for any of them.
    assert!(provider.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_text_plain_body_is_accepted() {
    let provider = MockServer::start().await;
    stub_species(
        &provider,
        "gag-grouper",
        ResponseTemplate::new(200).set_body_json(provider_record("Gag Grouper")),
    )
    .await;
    let router = build_router(make_state(&make_config(&provider)));

    let request = Request::post("/api/fish")
        .header("content-type", "text/plain;charset=UTF-8")
        .body(Body::from(r#"{"fish":"gag-grouper"}"#))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_key_rejected_without_provider_call() {
    let provider = MockServer::start().await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(fish_request(r#"{"fish":"../../admin"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, json!({ "error": "That fish isn't in the catalog." }));
    assert!(provider.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unlisted_key_forwarded_as_encoded_segment() {
    let provider = MockServer::start().await;
    stub_species(
        &provider,
        "blue%2Fmarlin",
        ResponseTemplate::new(200).set_body_json(provider_record("Blue Marlin")),
    )
    .await;
    let mut config = make_config(&provider);
    config.provider.allow_unlisted_species = true;
    let router = build_router(make_state(&config));

    let response = router
        .oneshot(fish_request(r#"{"fish":"blue/marlin"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["speciesName"], "Blue Marlin");
}

#[tokio::test]
async fn test_get_on_fish_endpoint_not_allowed() {
    let provider = MockServer::start().await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(Request::get("/api/fish").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =========================================================================
// GET /api/species, GET /health
// =========================================================================

#[tokio::test]
async fn test_list_species_in_catalog_order() {
    let provider = MockServer::start().await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(Request::get("/api/species").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 7);
    let keys: Vec<&str> = json["species"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    let catalog = Catalog::fishwatch();
    let expected: Vec<&str> = catalog.keys().collect();
    assert_eq!(keys, expected);
    assert_eq!(json["species"][0]["displayName"], "Red Snapper");
}

#[tokio::test]
async fn test_health() {
    let provider = MockServer::start().await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
}

// =========================================================================
// GET / -- rendered selector view
// =========================================================================

#[tokio::test]
async fn test_index_idle_lists_catalog() {
    let provider = MockServer::start().await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.contains("text/html"));

    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("No data yet. Select a fish from the dropdown."));
    for entry in Catalog::fishwatch().entries() {
        assert!(html.contains(&format!("<option value=\"{}\"", entry.key)));
    }
    assert!(provider.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_index_end_to_end_gag_grouper() {
    let provider = MockServer::start().await;
    stub_species(
        &provider,
        "gag-grouper",
        ResponseTemplate::new(200).set_body_json(provider_record("Gag Grouper")),
    )
    .await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(Request::get("/?fish=gag-grouper").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("<h2>Gag Grouper</h2>"));
    assert!(html.contains("Elongated body"));
    assert!(html.contains("Low in fat"));
    assert!(!html.contains("<p>Low in fat</p>"));
    assert!(html.contains("img.jpg"));
    assert!(html.contains("<option value=\"gag-grouper\" selected>"));
}

#[tokio::test]
async fn test_index_shows_provider_error_in_page() {
    let provider = MockServer::start().await;
    stub_species(&provider, "red-snapper", ResponseTemplate::new(500)).await;
    let router = build_router(make_state(&make_config(&provider)));

    let response = router
        .oneshot(Request::get("/?fish=red-snapper").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("<div class=\"error\">"));
    assert!(html.contains("wrong with FishWatch."));
}
