//! Upload -> stage -> extract -> split -> embed -> index

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::retrieval::VectorIndex;
use crate::retry::{with_retry, RetryPolicy};

use super::parser::PdfParser;
use super::splitter::TextSplitter;
use super::staging::StagedPdf;

/// A fully indexed upload, ready to back a chat session
#[derive(Debug)]
pub struct IngestedDocument {
    /// Original upload filename
    pub filename: String,
    /// Physical pages in the PDF
    pub page_count: usize,
    /// Chunks in the index
    pub chunk_count: usize,
    /// The new index
    pub index: VectorIndex,
}

/// Ingestion pipeline for a single PDF upload
pub struct IngestPipeline {
    splitter: TextSplitter,
    embedder: Arc<dyn EmbeddingProvider>,
    retry: RetryPolicy,
    temp_dir: Option<PathBuf>,
}

impl IngestPipeline {
    /// Create a pipeline from configuration
    pub fn new(config: &AppConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            splitter: TextSplitter::from_config(&config.chunking),
            embedder,
            retry: RetryPolicy::from_config(&config.retry),
            temp_dir: config.ingestion.temp_dir.clone(),
        }
    }

    /// Only `.pdf` uploads are accepted
    pub fn validate_filename(filename: &str) -> Result<()> {
        if filename.ends_with(".pdf") {
            Ok(())
        } else {
            tracing::error!("Invalid file type: {}", filename);
            Err(Error::invalid_input("Only PDF files are allowed"))
        }
    }

    /// Run the whole pipeline. Nothing is published here; the caller swaps
    /// the returned index in once it has built the chat chain over it.
    pub async fn ingest(&self, filename: &str, data: &[u8]) -> Result<IngestedDocument> {
        Self::validate_filename(filename)?;
        let start = Instant::now();

        let staged = StagedPdf::write(data, self.temp_dir.as_deref()).await?;

        tracing::info!("Loading PDF {}", filename);
        let path = staged.path().to_path_buf();
        let pages = tokio::task::spawn_blocking(move || PdfParser::extract_pages(&path))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))??;
        tracing::info!("PDF loaded successfully. Number of pages: {}", pages.len());

        let chunks = self.splitter.split_pages(&pages, filename);
        if chunks.is_empty() {
            return Err(Error::parse("No text content could be extracted from PDF"));
        }
        tracing::info!("Documents split into {} chunks", chunks.len());

        tracing::info!("Creating vector index");
        let embedder = self.embedder.as_ref();
        let index = with_retry(&self.retry, || VectorIndex::build(&chunks, embedder)).await?;
        tracing::info!(
            "Vector index created: {} chunks, {} dimensions",
            index.len(),
            index.dimensions()
        );

        drop(staged);

        tracing::info!(
            "Processed '{}': {} pages, {} chunks in {:.1}s",
            filename,
            pages.len(),
            chunks.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(IngestedDocument {
            filename: filename.to_string(),
            page_count: pages.len(),
            chunk_count: chunks.len(),
            index,
        })
    }
}
