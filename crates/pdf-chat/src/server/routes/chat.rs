//! Chat endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse, SourceDocument};

/// POST /chat - Answer a question about the active document
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    // No document means 400 whatever the body looks like
    let session = state.sessions().require()?;
    let Json(request) = payload.map_err(|e| Error::invalid_input(e.body_text()))?;

    tracing::info!("Received chat message: {}", request.message);

    let output = state.answer(&session, &request).await.map_err(|e| {
        let e = e.classified();
        tracing::error!("Error in chat: {}", e);
        e
    })?;

    tracing::info!(
        "Answered from '{}' with {} sources",
        session.filename,
        output.source_documents.len()
    );

    Ok(Json(ChatResponse {
        response: output.answer,
        source_documents: output
            .source_documents
            .iter()
            .map(SourceDocument::from_chunk)
            .collect(),
    }))
}
