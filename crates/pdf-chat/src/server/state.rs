//! Application state for the PDF chat server

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::generation::ChainOutput;
use crate::ingestion::IngestPipeline;
use crate::providers::{EmbeddingProvider, GeminiClient, LlmProvider, LoggedEmbedder, LoggedLlm};
use crate::retry::{with_retry, RetryPolicy};
use crate::session::{Session, SessionStore};
use crate::types::ChatRequest;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Embedding provider
    embedder: Arc<dyn EmbeddingProvider>,
    /// Chat model
    llm: Arc<dyn LlmProvider>,
    /// Upload pipeline
    pipeline: IngestPipeline,
    /// Backoff for chat calls
    retry: RetryPolicy,
    /// Currently loaded document
    sessions: SessionStore,
}

impl AppState {
    /// Create state backed by the Gemini API
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Arc::new(GeminiClient::new(&config.llm)?);
        tracing::info!(
            "Gemini client initialized (embeddings: {}, chat: {})",
            config.llm.embed_model,
            config.llm.chat_model
        );

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(LoggedEmbedder::new(client.clone()));
        let llm: Arc<dyn LlmProvider> = Arc::new(LoggedLlm::new(client));
        Ok(Self::with_providers(config, embedder, llm))
    }

    /// Create state over arbitrary providers
    pub fn with_providers(
        config: AppConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        let pipeline = IngestPipeline::new(&config, embedder.clone());
        let retry = RetryPolicy::from_config(&config.retry);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                llm,
                pipeline,
                retry,
                sessions: SessionStore::new(),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Check if a document is loaded
    pub fn is_ready(&self) -> bool {
        self.inner.sessions.is_ready()
    }

    /// Ingest an upload and make it the active document. The previous
    /// document stays active until this returns `Ok`.
    pub async fn ingest_document(&self, filename: &str, data: &[u8]) -> Result<Arc<Session>> {
        IngestPipeline::validate_filename(filename)?;

        let _upload = self.inner.sessions.begin_upload().await;
        let document = self.inner.pipeline.ingest(filename, data).await?;

        tracing::info!("Creating conversation chain");
        let session = Session::new(
            document,
            self.inner.llm.clone(),
            self.inner.embedder.clone(),
            &self.inner.config.retrieval,
        );

        if let Some(previous) = self.inner.sessions.publish(session) {
            tracing::info!("Replaced document '{}'", previous.filename);
        }
        self.inner.sessions.require()
    }

    /// Answer a chat message against `session`
    pub async fn answer(&self, session: &Session, request: &ChatRequest) -> Result<ChainOutput> {
        let history = request.history();
        with_retry(&self.inner.retry, || {
            session.chain().invoke(&request.message, history)
        })
        .await
    }
}
