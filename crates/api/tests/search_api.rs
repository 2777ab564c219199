//! Integration tests for the travel search proxy, against a stubbed
//! provider served from a local socket.

mod common;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{body_json, post_json};
use serde_json::{json, Value};
use wayfare_gemini::{GeminiConfig, GeminiCredential};

/// Serve `reply` with `status` for every generateContent call, on an
/// ephemeral port. Returns the base URL to configure the client with.
async fn spawn_stub_provider(status: StatusCode, reply: Value) -> String {
    let app = Router::new().route(
        "/models/{model}",
        post(move || {
            let reply = reply.clone();
            async move { (status, Json(reply)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn provider_config(api_url: String) -> GeminiConfig {
    GeminiConfig {
        api_url,
        model: "gemini-2.0-flash".to_string(),
        credential: GeminiCredential::ApiKey("test-key".to_string()),
        timeout_secs: 5,
    }
}

/// App wired to the stub provider, with a throwaway local comment store.
fn build_search_app(dir: &tempfile::TempDir, stub_url: String) -> Router {
    let mut config = common::test_config(&dir.path().join("comments.json"));
    config.gemini = Some(provider_config(stub_url));
    common::build_app(config)
}

// ---------------------------------------------------------------------------
// Validation and configuration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_without_provider_returns_503() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("comments.json"));

    let response = post_json(&app, "/search", json!({"query": "beach week"})).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let error = body_json(response).await;
    assert_eq!(error["code"], "PROVIDER_UNCONFIGURED");
}

#[tokio::test]
async fn blank_query_is_rejected_before_the_provider_check() {
    let dir = tempfile::tempdir().unwrap();
    // No provider configured: a 400 here proves validation runs first.
    let app = common::build_test_app(&dir.path().join("comments.json"));

    let response = post_json(&app, "/search", json!({"query": "   "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error = body_json(response).await;
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn out_of_range_max_results_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(&dir.path().join("comments.json"));

    for max_results in [0, 21] {
        let response = post_json(
            &app,
            "/search",
            json!({"query": "beach week", "max_results": max_results}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// ---------------------------------------------------------------------------
// Happy paths against the stub provider
// ---------------------------------------------------------------------------

#[tokio::test]
async fn structured_reply_is_shaped_and_truncated() {
    let reply = json!([
        {"title": "Lisbon week", "country": "Portugal", "price": 900, "duration": "7 days",
         "highlights": ["pasteis", "trams"], "booking_url": "https://example.com/lisbon"},
        {"title": "Porto escape", "country": "Portugal", "price": "1,200 USD", "duration": "5 days",
         "highlights": ["port wine"], "booking_url": "https://example.com/porto"},
        {"title": "Azores hike", "country": "Portugal", "price": 1500, "duration": "10 days",
         "highlights": ["volcanoes"], "booking_url": "https://example.com/azores"}
    ]);
    let stub_url = spawn_stub_provider(StatusCode::OK, reply).await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_search_app(&dir, stub_url);

    let response = post_json(
        &app,
        "/search",
        json!({"query": "a week in Portugal", "max_results": 2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2, "results must be capped at max_results");
    assert_eq!(results[0]["title"], "Lisbon week");
    // Lenient price shaping turns "1,200 USD" into a number.
    assert_eq!(results[1]["price"], 1200.0);
}

#[tokio::test]
async fn prose_wrapped_reply_is_normalized() {
    let reply = json!({
        "candidates": [{
            "content": { "parts": [{
                "text": "Here are my suggestions:\n```json\n[{\"title\": \"Kyoto in autumn\", \"country\": \"Japan\"}]\n```"
            }] }
        }]
    });
    let stub_url = spawn_stub_provider(StatusCode::OK, reply).await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_search_app(&dir, stub_url);

    let response = post_json(&app, "/search", json!({"query": "autumn foliage"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["results"][0]["title"], "Kyoto in autumn");
}

#[tokio::test]
async fn empty_provider_array_yields_empty_results() {
    let stub_url = spawn_stub_provider(StatusCode::OK, json!([])).await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_search_app(&dir, stub_url);

    let response = post_json(&app, "/search", json!({"query": "underwater basket weaving"})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["results"], json!([]));
}

#[tokio::test]
async fn non_object_elements_are_dropped_during_shaping() {
    let reply = json!([
        {"title": "Real option"},
        "stray string the model slipped in",
        {"title": "Another real option"}
    ]);
    let stub_url = spawn_stub_provider(StatusCode::OK, reply).await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_search_app(&dir, stub_url);

    let response = post_json(&app, "/search", json!({"query": "anything"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unusable_reply_returns_502_without_leaking_the_payload() {
    let reply = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "I have no suggestions for that." }] }
        }]
    });
    let stub_url = spawn_stub_provider(StatusCode::OK, reply).await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_search_app(&dir, stub_url);

    let response = post_json(&app, "/search", json!({"query": "impossible trip"})).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let error = body_json(response).await;
    assert_eq!(error["code"], "UPSTREAM_ERROR");
    // The provider's text must not be echoed to the caller.
    assert!(!error["error"]
        .as_str()
        .unwrap()
        .contains("I have no suggestions"));
}

#[tokio::test]
async fn provider_error_response_returns_502() {
    let stub_url =
        spawn_stub_provider(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;

    let dir = tempfile::tempdir().unwrap();
    let app = build_search_app(&dir, stub_url);

    let response = post_json(&app, "/search", json!({"query": "beach week"})).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let error = body_json(response).await;
    assert_eq!(error["code"], "UPSTREAM_ERROR");
}
