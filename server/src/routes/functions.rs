//! Serverless function routes — `chat-gemini` and `chat-webhook`.
//!
//! Both accept `{message, userId?}` and answer either a success body or
//! `{error, details, status: "error"}` with HTTP 500. Nothing is retried.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chat::wire::{FunctionFailure, FunctionRequest, FunctionSuccess};
use tracing::error;

use crate::services::rag;
use crate::services::webhook_proxy::ProxyError;
use crate::state::AppState;

pub const GEMINI_FAILURE: &str = "Falha ao processar mensagem com Gemini";
pub const WEBHOOK_FAILURE: &str = "Falha ao processar mensagem";

/// `POST /functions/v1/chat-gemini` — RAG answer with source citations.
pub async fn chat_gemini(State(state): State<AppState>, body: Result<Json<FunctionRequest>, JsonRejection>) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return failure("chat-gemini", GEMINI_FAILURE, rejection.body_text()),
    };

    match rag::answer(&state, &request).await {
        Ok(answer) => Json(FunctionSuccess::new(answer.response, answer.sources)).into_response(),
        Err(e) => failure("chat-gemini", GEMINI_FAILURE, e.to_string()),
    }
}

/// `POST /functions/v1/chat-webhook` — relay to the automation webhook.
pub async fn chat_webhook(State(state): State<AppState>, body: Result<Json<FunctionRequest>, JsonRejection>) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return failure("chat-webhook", WEBHOOK_FAILURE, rejection.body_text()),
    };

    let Some(proxy) = &state.webhook else {
        return failure("chat-webhook", WEBHOOK_FAILURE, ProxyError::NotConfigured.to_string());
    };

    match proxy.forward(&request).await {
        Ok(text) => Json(FunctionSuccess::new(text, Vec::new())).into_response(),
        Err(e) => failure("chat-webhook", WEBHOOK_FAILURE, e.to_string()),
    }
}

/// Bare `OPTIONS` without CORS request headers; real preflights are answered
/// by the CORS layer before reaching here.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn failure(function: &str, message: &str, details: String) -> Response {
    error!(function, %details, "function failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(FunctionFailure::new(message, details))).into_response()
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
