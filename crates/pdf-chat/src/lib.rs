//! pdf-chat: question answering over a single uploaded PDF
//!
//! An uploaded PDF is split into page-aware chunks, embedded with the Gemini
//! embedding model and held in an in-memory index. Questions are answered by a
//! conversational retrieval chain that condenses the chat history, retrieves the
//! closest chunks and asks the Gemini chat model for a grounded answer.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod retry;
pub mod server;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, ChunkMetadata, Page},
    request::ChatRequest,
    response::{ChatResponse, SourceDocument, UploadResponse},
};
