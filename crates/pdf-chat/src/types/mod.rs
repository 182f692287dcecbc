//! Core types for the PDF chat service

pub mod document;
pub mod request;
pub mod response;

pub use document::{Chunk, ChunkMetadata, Page};
pub use request::ChatRequest;
pub use response::{ChatResponse, SourceDocument, UploadResponse};
