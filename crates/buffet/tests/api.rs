mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use buffet::server::{AppState, build_app};

async fn post_json(state: AppState, body: impl Into<Body>) -> (StatusCode, Value) {
    let app = build_app(state, 30);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/ai-models")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Vec<u8>) {
    let app = build_app(state, 30);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn mixed_success_and_failure() {
    let (url, upstream) = common::spawn_upstream().await;
    let body = json!({"prompt": "hello", "models": ["a", "b"]}).to_string();

    let (status, json) = post_json(common::state_for(url), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"results": [
            {"model": "a", "content": "hi", "error": null},
            {"model": "b", "content": "", "error": "API error: 500"}
        ]})
    );
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn results_follow_request_order() {
    let (url, _) = common::spawn_upstream().await;
    let body = json!({"prompt": "  ping  ", "models": ["x", "a", "empty", "y"]}).to_string();

    let (status, json) = post_json(common::state_for(url), body).await;
    assert_eq!(status, StatusCode::OK);

    let results = json["results"].as_array().unwrap();
    let models: Vec<_> = results.iter().map(|r| r["model"].as_str().unwrap()).collect();
    assert_eq!(models, vec!["x", "a", "empty", "y"]);
    assert_eq!(results[0]["content"], "echo: ping");
    assert_eq!(results[2]["content"], "");
    assert!(results[2]["error"].is_null());
}

#[tokio::test]
async fn empty_prompt_is_rejected_before_upstream() {
    let (url, upstream) = common::spawn_upstream().await;
    let body = json!({"prompt": "", "models": ["a"]}).to_string();

    let (status, json) = post_json(common::state_for(url), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Missing prompt"}));
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn missing_prompt_field_is_rejected() {
    let (url, _) = common::spawn_upstream().await;
    let body = json!({"models": ["a"]}).to_string();

    let (status, json) = post_json(common::state_for(url), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing prompt");
}

#[tokio::test]
async fn empty_or_malformed_models_are_rejected() {
    let (url, upstream) = common::spawn_upstream().await;

    for models in [json!([]), json!("a"), json!(null), json!([1, 2])] {
        let body = json!({"prompt": "hello", "models": models.clone()}).to_string();
        let (status, json) = post_json(common::state_for(url.clone()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "models: {models}");
        assert_eq!(json, json!({"error": "No models selected"}));
    }
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let (url, _) = common::spawn_upstream().await;

    let (status, json) = post_json(common::state_for(url), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert_ne!(message, "Missing prompt");
}

#[tokio::test]
async fn missing_credential_is_a_server_error() {
    // Checked before input validation.
    let body = json!({"prompt": "", "models": []}).to_string();

    let (status, json) = post_json(common::unconfigured_state(), body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({"error": "Server misconfigured: OPENROUTER_API_KEY is missing."})
    );
}

#[tokio::test]
async fn model_catalog_is_listed() {
    let (status, body) = get(common::unconfigured_state(), "/api/v1/models").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        json!({
            "models": [
                {"id": "a", "label": "Model A"},
                {"id": "b", "label": "Model B"}
            ],
            "default": ["a"]
        })
    );
}

#[tokio::test]
async fn health_endpoints() {
    let (url, _) = common::spawn_upstream().await;

    let (status, body) = get(common::state_for(url.clone()), "/livez").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, _) = get(common::state_for(url), "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(common::unconfigured_state(), "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn version_reports_package() {
    let (status, body) = get(common::unconfigured_state(), "/version").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["name"], "buffet");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
