//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Functions are mounted under `/functions/v1/<name>`, the path browser
//! clients already use for serverless invocation. CORS is fully permissive:
//! any origin, any method, and the headers those clients send.

pub mod functions;

use axum::Router;
use axum::http::StatusCode;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Headers browser clients attach to function calls.
const ALLOWED_HEADERS: [HeaderName; 4] = [
    AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    CONTENT_TYPE,
];

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(ALLOWED_HEADERS);

    Router::new()
        .route(
            "/functions/v1/chat-gemini",
            post(functions::chat_gemini).options(functions::preflight),
        )
        .route(
            "/functions/v1/chat-webhook",
            post(functions::chat_webhook).options(functions::preflight),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
