//! RAG service — document search + prompt assembly + LLM call.
//!
//! DESIGN
//! ======
//! Backs the `chat-gemini` function. Retrieves up to [`SEARCH_LIMIT`] chunks
//! for the user's message, inlines them into a fixed Portuguese instruction
//! template, and returns the generated text with one source citation per
//! retrieved chunk.

use std::fmt::Write;

use chat::message::Source;
use chat::wire::FunctionRequest;
use tracing::info;

use crate::llm::types::LlmError;
use crate::services::documents::{DocumentChunk, DocumentError};
use crate::state::AppState;

pub const SEARCH_LIMIT: i64 = 5;
pub const EXCERPT_CHARS: usize = 150;
/// Returned when the model produces no candidate text.
pub const NO_ANSWER_TEXT: &str = "Desculpe, não consegui gerar uma resposta.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("Google API key not configured")]
    LlmNotConfigured,
    #[error("document store not configured")]
    DocumentsNotConfigured,
    #[error(transparent)]
    Search(#[from] DocumentError),
    #[error("Gemini API request failed: {0}")]
    Llm(#[from] LlmError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagAnswer {
    pub response: String,
    pub sources: Vec<Source>,
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Answer `request` from the documentation corpus.
///
/// # Errors
///
/// Returns an error if a backend is not configured, the search fails, or the
/// LLM call fails.
pub async fn answer(state: &AppState, request: &FunctionRequest) -> Result<RagAnswer, RagError> {
    let llm = state.llm.as_ref().ok_or(RagError::LlmNotConfigured)?;
    let documents = state.documents.as_ref().ok_or(RagError::DocumentsNotConfigured)?;

    info!(user_id = ?request.user_id, message_len = request.message.len(), "rag: message received");

    let chunks = documents.search(&request.message, SEARCH_LIMIT).await?;
    info!(count = chunks.len(), "rag: documents retrieved");

    let prompt = build_prompt(&build_context(&chunks), &request.message);
    let generated = llm.generate(&prompt).await?;
    info!(answered = generated.is_some(), "rag: llm response received");

    Ok(RagAnswer {
        response: generated.unwrap_or_else(|| NO_ANSWER_TEXT.to_string()),
        sources: chunks.iter().map(source_for).collect(),
    })
}

// =============================================================================
// PROMPT
// =============================================================================

/// Number and join chunk contents: `Documento N:\n<content>`.
#[must_use]
pub fn build_context(chunks: &[DocumentChunk]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("Documento {}:\n{}", i + 1, chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[must_use]
pub fn build_prompt(context: &str, message: &str) -> String {
    let mut prompt = String::from(
        "Você é ChatBW, assistente interno da empresa especializado em procedimentos e documentação técnica. \n\n\
INSTRUÇÕES:\n\
- Responda sempre em português brasileiro\n\
- Use a documentação fornecida para dar respostas precisas e específicas\n\
- Se não houver informação suficiente na documentação, seja claro sobre isso\n\
- Formate sua resposta usando Markdown para melhor legibilidade\n\
- Mantenha um tom profissional mas acessível\n\n",
    );
    let _ = write!(
        prompt,
        "CONTEXTO DA DOCUMENTAÇÃO:\n{context}\n\n\
PERGUNTA DO USUÁRIO: {message}\n\n\
Por favor, forneça uma resposta detalhada baseada na documentação disponível."
    );
    prompt
}

// =============================================================================
// SOURCES
// =============================================================================

#[must_use]
pub fn source_for(chunk: &DocumentChunk) -> Source {
    Source {
        title: chunk
            .title()
            .map_or_else(|| format!("Documento {}", chunk.id), str::to_string),
        path: chunk
            .path()
            .map_or_else(|| format!("/docs/document-{}", chunk.id), str::to_string),
        excerpt: excerpt(&chunk.content),
    }
}

/// First [`EXCERPT_CHARS`] characters, with `...` appended only when cut.
#[must_use]
pub fn excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[cfg(test)]
#[path = "rag_test.rs"]
mod tests;
