use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::post;
use serde_json::{Value, json};

use super::*;
use crate::routes::app;
use crate::services::webhook_proxy::WebhookProxy;
use crate::state::test_helpers::{MockDocuments, MockLlm, chunk, rag_state};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post_json(url: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new().post(url).json(&body).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

// =========================================================================
// CORS / health
// =========================================================================

#[tokio::test]
async fn healthz_is_ok() {
    let base = serve(app(AppState::default())).await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn cors_preflight_short_circuits_with_permissive_headers() {
    let base = serve(app(AppState::default())).await;
    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/functions/v1/chat-gemini"))
        .header("origin", "http://localhost:8080")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "apikey, content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let headers = resp.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let allowed = headers["access-control-allow-headers"].to_str().unwrap();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "{allowed}");
    }
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn bare_options_is_empty_200() {
    let base = serve(app(AppState::default())).await;
    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{base}/functions/v1/chat-webhook"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert!(resp.text().await.unwrap().is_empty());
}

// =========================================================================
// chat-gemini
// =========================================================================

#[tokio::test]
async fn chat_gemini_success_body() {
    let long = "x".repeat(200);
    let docs = MockDocuments::with(vec![chunk(3, &long, Some("Runbook"), None)]);
    let (state, _, _) = rag_state(MockLlm::answering("**Passo 1**"), docs);
    let base = serve(app(state)).await;

    let (status, body) =
        post_json(&format!("{base}/functions/v1/chat-gemini"), json!({ "message": "reset", "userId": "u-1" })).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    assert_eq!(body["response"], "**Passo 1**");
    assert_eq!(body["sources"][0]["title"], "Runbook");
    assert_eq!(body["sources"][0]["path"], "/docs/document-3");
    assert_eq!(body["sources"][0]["excerpt"].as_str().unwrap().chars().count(), 153);
}

#[tokio::test]
async fn chat_gemini_missing_credentials_is_500() {
    let base = serve(app(AppState::default())).await;
    let (status, body) = post_json(&format!("{base}/functions/v1/chat-gemini"), json!({ "message": "x" })).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": GEMINI_FAILURE, "details": "Google API key not configured", "status": "error" }));
}

#[tokio::test]
async fn chat_gemini_upstream_error_is_500() {
    let (state, _, _) = rag_state(MockLlm::failing(429), MockDocuments::with(Vec::new()));
    let base = serve(app(state)).await;
    let (status, body) = post_json(&format!("{base}/functions/v1/chat-gemini"), json!({ "message": "x" })).await;
    assert_eq!(status, 500);
    assert_eq!(body["status"], "error");
    assert!(body["details"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn chat_gemini_search_error_is_500() {
    let (state, _, _) = rag_state(MockLlm::answering("unused"), MockDocuments::failing());
    let base = serve(app(state)).await;
    let (status, body) = post_json(&format!("{base}/functions/v1/chat-gemini"), json!({ "message": "x" })).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], GEMINI_FAILURE);
}

#[tokio::test]
async fn chat_gemini_malformed_body_is_500() {
    let (state, _, _) = rag_state(MockLlm::answering("unused"), MockDocuments::with(Vec::new()));
    let base = serve(app(state)).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/functions/v1/chat-gemini"))
        .header("content-type", "application/json")
        .body("{oops")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
}

// =========================================================================
// chat-webhook
// =========================================================================

#[tokio::test]
async fn chat_webhook_relays_raw_text() {
    let upstream = serve(Router::new().route("/hook", post(|| async { r#"[{"output":"feito"}]"# }))).await;
    let proxy = WebhookProxy::new(format!("{upstream}/hook"), Duration::from_secs(5), Duration::from_secs(2)).unwrap();
    let state = AppState::new(None, None, Some(Arc::new(proxy)));
    let base = serve(app(state)).await;

    let (status, body) = post_json(&format!("{base}/functions/v1/chat-webhook"), json!({ "message": "x" })).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "response": r#"[{"output":"feito"}]"#, "status": "success" }));
}

#[tokio::test]
async fn chat_webhook_upstream_failure_is_500() {
    let upstream = serve(Router::new().route(
        "/hook",
        post(|| async { (axum::http::StatusCode::BAD_GATEWAY, "down") }),
    ))
    .await;
    let proxy = WebhookProxy::new(format!("{upstream}/hook"), Duration::from_secs(5), Duration::from_secs(2)).unwrap();
    let base = serve(app(AppState::new(None, None, Some(Arc::new(proxy))))).await;

    let (status, body) = post_json(&format!("{base}/functions/v1/chat-webhook"), json!({ "message": "x" })).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], WEBHOOK_FAILURE);
    assert_eq!(body["details"], "Webhook request failed: 502");
}

#[tokio::test]
async fn chat_webhook_not_configured_is_500() {
    let base = serve(app(AppState::default())).await;
    let (status, body) = post_json(&format!("{base}/functions/v1/chat-webhook"), json!({ "message": "x" })).await;
    assert_eq!(status, 500);
    assert_eq!(body["details"], "webhook URL not configured");
}
