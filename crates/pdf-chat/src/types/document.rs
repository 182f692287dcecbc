//! Page and chunk types with page tracking for source reporting

use serde::{Deserialize, Serialize};

/// Text extracted from one physical page of a PDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (0-indexed)
    pub page_number: u32,
    /// Extracted text
    pub content: String,
}

impl Page {
    /// Create a new page
    pub fn new(page_number: u32, content: impl Into<String>) -> Self {
        Self {
            page_number,
            content: content.into(),
        }
    }
}

/// Where a chunk came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Original upload filename
    pub source: String,
    /// Page the chunk was cut from (0-indexed)
    pub page: Option<u32>,
}

/// A bounded slice of page text, the unit of embedding and retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text
    pub content: String,
    /// Source tracking
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a chunk cut from `page` of `source`
    pub fn new(content: impl Into<String>, source: impl Into<String>, page: u32) -> Self {
        Self {
            content: content.into(),
            metadata: ChunkMetadata {
                source: source.into(),
                page: Some(page),
            },
        }
    }

    /// Page number, 0 when unknown
    pub fn page_or_default(&self) -> u32 {
        self.metadata.page.unwrap_or(0)
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
