//! The single active document session
//!
//! At most one document is loaded at a time. Readers take an `Arc` snapshot
//! of the current session; a new upload is built off to the side and
//! swapped in with one write, so a chat in flight never sees a half-built
//! index and a failed upload leaves the previous session untouched.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::config::RetrievalConfig;
use crate::error::{Error, Result};
use crate::generation::ConversationalRetrievalChain;
use crate::ingestion::IngestedDocument;
use crate::providers::{EmbeddingProvider, LlmProvider};

/// An indexed document bound to its chat chain
pub struct Session {
    pub id: Uuid,
    pub filename: String,
    pub page_count: usize,
    pub chunk_count: usize,
    pub ingested_at: DateTime<Utc>,
    chain: ConversationalRetrievalChain,
}

impl Session {
    /// Bind a chat chain to a freshly ingested document
    pub fn new(
        document: IngestedDocument,
        llm: Arc<dyn LlmProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: &RetrievalConfig,
    ) -> Self {
        let IngestedDocument {
            filename,
            page_count,
            chunk_count,
            index,
        } = document;

        Self {
            id: Uuid::new_v4(),
            filename,
            page_count,
            chunk_count,
            ingested_at: Utc::now(),
            chain: ConversationalRetrievalChain::new(llm, embedder, Arc::new(index), config),
        }
    }

    pub fn chain(&self) -> &ConversationalRetrievalChain {
        &self.chain
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("filename", &self.filename)
            .field("chunk_count", &self.chunk_count)
            .field("ingested_at", &self.ingested_at)
            .finish()
    }
}

/// Holder for the current session
#[derive(Default)]
pub struct SessionStore {
    current: RwLock<Option<Arc<Session>>>,
    upload_lock: Mutex<()>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current session, if any
    pub fn current(&self) -> Option<Arc<Session>> {
        self.current.read().clone()
    }

    /// Snapshot of the current session, or `NotReady`
    pub fn require(&self) -> Result<Arc<Session>> {
        self.current().ok_or(Error::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    /// Serialize uploads. Hold the guard from ingestion start until publish.
    pub async fn begin_upload(&self) -> MutexGuard<'_, ()> {
        self.upload_lock.lock().await
    }

    /// Make `session` current, returning the one it replaces
    pub fn publish(&self, session: Session) -> Option<Arc<Session>> {
        let session = Arc::new(session);
        tracing::info!(
            "Session {} active: '{}' ({} chunks)",
            session.id,
            session.filename,
            session.chunk_count
        );
        self.current.write().replace(session)
    }
}
