mod db;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::llm::LlmGenerate;
use crate::services::documents::{DocumentStore, PgDocumentStore};
use crate::services::webhook_proxy::WebhookProxy;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Each backend is optional: a function whose backend is missing answers 500.
    let documents: Option<Arc<dyn DocumentStore>> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = db::init_pool(&database_url)
                .await
                .expect("database init failed");
            Some(Arc::new(PgDocumentStore::new(pool)))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set — document search disabled");
            None
        }
    };

    let llm: Option<Arc<dyn LlmGenerate>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured — chat-gemini disabled");
            None
        }
    };

    let webhook = match WebhookProxy::from_env() {
        Ok(proxy) => {
            tracing::info!(url = proxy.url(), "webhook proxy initialized");
            Some(Arc::new(proxy))
        }
        Err(e) => {
            tracing::warn!(error = %e, "webhook proxy not configured — chat-webhook disabled");
            None
        }
    };

    let state = state::AppState::new(llm, documents, webhook);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chatbw functions listening");
    axum::serve(listener, app).await.expect("server failed");
}
