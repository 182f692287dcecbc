//! Embedding provider trait for generating text embeddings

use async_trait::async_trait;
use crate::error::Result;

/// Trait for generating text embeddings
///
/// Implementations:
/// - `GeminiClient`: Generative Language API (embedding-001)
/// - `LoggedEmbedder`: tracing decorator around any other provider
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed document chunks, one vector per text, in input order
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a search query
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
