//! Deterministic in-process providers for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, LlmProvider};

/// Embeds text as its letter histogram plus a constant bias dimension
pub struct LetterEmbedder;

impl LetterEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; 27];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            v[(c.to_ascii_lowercase() as u8 - b'a') as usize] += 1.0;
        }
        v[26] = 0.01;
        v
    }
}

#[async_trait]
impl EmbeddingProvider for LetterEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector(text))
    }

    fn name(&self) -> &str {
        "letters"
    }
}

/// Embedder that always reports the given failure
pub struct FailingEmbedder(pub &'static str);

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed_documents(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(Error::embedding(self.0))
    }

    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>> {
        Err(Error::embedding(self.0))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// LLM that answers "echo: <prompt>" and records every prompt
#[derive(Default)]
pub struct EchoLlm {
    prompts: Mutex<Vec<String>>,
}

impl EchoLlm {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for EchoLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        Ok(format!("echo: {}", prompt))
    }

    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-1"
    }
}
