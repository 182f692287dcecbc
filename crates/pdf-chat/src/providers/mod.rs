//! Provider abstractions for embeddings and chat generation
//!
//! The pipeline only talks to these traits. `GeminiClient` implements both
//! against the Generative Language API; the `logging` decorators wrap any
//! implementation and trace each call.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod logging;

pub use embedding::EmbeddingProvider;
pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use logging::{LoggedEmbedder, LoggedLlm};

#[cfg(test)]
pub(crate) mod testing;
