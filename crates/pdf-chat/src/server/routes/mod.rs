//! API routes for the PDF chat server

pub mod chat;
pub mod upload;

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload::upload_pdf).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/chat", post(chat::chat))
}
