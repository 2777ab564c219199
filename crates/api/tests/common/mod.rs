#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wayfare_api::config::ServerConfig;
use wayfare_api::router::build_app_router;
use wayfare_api::state::AppState;
use wayfare_gemini::GeminiClient;
use wayfare_store::{CommentService, StoreConfig};

/// Build a test `ServerConfig` backed by a local comment file at
/// `comments_path`, with no AI provider configured.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(comments_path: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
        store: StoreConfig::Local {
            path: comments_path.to_string_lossy().into_owned(),
        },
        gemini: None,
    }
}

/// Build the application router over a local store file, with the full
/// production middleware stack and no AI provider.
pub fn build_test_app(comments_path: &Path) -> Router {
    build_app(test_config(comments_path))
}

/// Build the application router from an explicit config, wiring the store
/// and provider the way `main.rs` does.
///
/// This mirrors the binary's startup so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_app(config: ServerConfig) -> Router {
    let store = config.store.build().expect("store should build");
    let comments = Arc::new(CommentService::new(store));
    let gemini = config
        .gemini
        .clone()
        .map(|g| Arc::new(GeminiClient::new(g).expect("Gemini client should build")));

    let state = AppState { comments, gemini };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a DELETE request against the app.
pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
