//! Tracing decorators around provider implementations

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::llm::LlmProvider;

/// Characters of a prompt included in the log line
const PROMPT_PREVIEW_CHARS: usize = 200;

/// Embedding provider that logs every call before delegating
pub struct LoggedEmbedder {
    inner: Arc<dyn EmbeddingProvider>,
}

impl LoggedEmbedder {
    pub fn new(inner: Arc<dyn EmbeddingProvider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EmbeddingProvider for LoggedEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        tracing::info!("[{} Embeddings] Embedding {} documents", self.inner.name(), texts.len());
        let start = Instant::now();
        let result = self.inner.embed_documents(texts).await;
        if let Err(e) = &result {
            tracing::warn!("[{} Embeddings] Document embedding failed: {}", self.inner.name(), e);
        } else {
            tracing::debug!(
                "[{} Embeddings] Embedded {} documents in {}ms",
                self.inner.name(),
                texts.len(),
                start.elapsed().as_millis()
            );
        }
        result
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        tracing::info!("[{} Embeddings] Embedding single query", self.inner.name());
        let result = self.inner.embed_query(text).await;
        if let Err(e) = &result {
            tracing::warn!("[{} Embeddings] Query embedding failed: {}", self.inner.name(), e);
        }
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// LLM provider that logs a truncated prompt before delegating
pub struct LoggedLlm {
    inner: Arc<dyn LlmProvider>,
}

impl LoggedLlm {
    pub fn new(inner: Arc<dyn LlmProvider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmProvider for LoggedLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::info!(
            "[{} Chat] Sending prompt (truncated): {}...",
            self.inner.name(),
            prompt_preview(prompt)
        );
        let start = Instant::now();
        let result = self.inner.generate(prompt).await;
        match &result {
            Ok(answer) => tracing::debug!(
                "[{} Chat] {} returned {} chars in {}ms",
                self.inner.name(),
                self.inner.model(),
                answer.len(),
                start.elapsed().as_millis()
            ),
            Err(e) => tracing::warn!("[{} Chat] Generation failed: {}", self.inner.name(), e),
        }
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}

/// Single-line preview of a prompt
fn prompt_preview(prompt: &str) -> String {
    prompt
        .chars()
        .take(PROMPT_PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{EchoLlm, LetterEmbedder};

    #[test]
    fn test_prompt_preview() {
        let prompt = format!("line one\nline two\n{}", "x".repeat(500));
        let preview = prompt_preview(&prompt);
        assert_eq!(preview.chars().count(), PROMPT_PREVIEW_CHARS);
        assert!(!preview.contains('\n'));
        assert!(preview.starts_with("line one line two"));
    }

    #[tokio::test]
    async fn test_decorators_delegate() {
        let embedder = LoggedEmbedder::new(Arc::new(LetterEmbedder));
        let direct = LetterEmbedder.embed_query("abc").await.unwrap();
        assert_eq!(embedder.embed_query("abc").await.unwrap(), direct);
        assert_eq!(embedder.name(), "letters");

        let texts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(embedder.embed_documents(&texts).await.unwrap().len(), 2);

        let llm = LoggedLlm::new(Arc::new(EchoLlm::default()));
        assert_eq!(llm.generate("ping").await.unwrap(), "echo: ping");
        assert_eq!(llm.model(), "echo-1");
    }
}
