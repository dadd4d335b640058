use std::collections::HashMap;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};

use super::config::LlmTimeouts;
use super::types::GenerationConfig;
use super::*;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> LlmClient {
    LlmClient::from_config(LlmConfig {
        api_key: "test-key".into(),
        model: "gemini-1.5-flash".into(),
        base_url,
        generation: GenerationConfig::default(),
        timeouts: LlmTimeouts { request_secs: 5, connect_secs: 2 },
    })
    .unwrap()
}

#[tokio::test]
async fn generate_posts_prompt_with_key_and_model() {
    let router = Router::new().route(
        "/v1beta/models/{action}",
        post(
            |Path(action): Path<String>, Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                let text = format!(
                    "{action}|{}|{}",
                    query.get("key").cloned().unwrap_or_default(),
                    body["contents"][0]["parts"][0]["text"].as_str().unwrap_or("")
                );
                Json(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }))
            },
        ),
    );
    let base = serve(router).await;
    let llm = client(format!("{base}/v1beta"));
    assert_eq!(llm.model(), "gemini-1.5-flash");

    let text = llm.generate("como reiniciar o servidor?").await.unwrap();
    assert_eq!(
        text.as_deref(),
        Some("gemini-1.5-flash:generateContent|test-key|como reiniciar o servidor?")
    );
}

#[tokio::test]
async fn generate_non_200_is_api_response_error() {
    let router = Router::new().route(
        "/v1beta/models/{action}",
        post(|| async { (StatusCode::FORBIDDEN, "API key not valid") }),
    );
    let base = serve(router).await;
    let err = client(format!("{base}/v1beta")).generate("x").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 403, ref body } if body == "API key not valid"));
}

#[tokio::test]
async fn generate_accepts_any_success_status() {
    let router = Router::new().route(
        "/v1beta/models/{action}",
        post(|| async {
            (
                StatusCode::NON_AUTHORITATIVE_INFORMATION,
                Json(json!({ "candidates": [{ "content": { "parts": [{ "text": "via proxy" }] } }] })),
            )
        }),
    );
    let base = serve(router).await;
    let text = client(format!("{base}/v1beta")).generate("x").await.unwrap();
    assert_eq!(text.as_deref(), Some("via proxy"));
}
