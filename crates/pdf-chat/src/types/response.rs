//! Response types for the HTTP surface

use serde::{Deserialize, Serialize};

use crate::types::Chunk;

/// Characters of chunk text shown in a source excerpt
pub const EXCERPT_CHARS: usize = 200;
/// Marker appended to every excerpt
pub const EXCERPT_MARKER: &str = "...";

/// Body of a successful `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

impl UploadResponse {
    pub fn processed() -> Self {
        Self {
            message: "PDF processed successfully".to_string(),
        }
    }
}

/// Body of a successful `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer
    pub response: String,
    /// Chunks the answer was conditioned on
    pub source_documents: Vec<SourceDocument>,
}

/// Display form of a retrieved chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Page number (0-indexed, 0 when unknown)
    pub page: u32,
    /// First 200 characters of the chunk followed by "..."
    pub content: String,
}

impl SourceDocument {
    /// Build the display form of a chunk
    pub fn from_chunk(chunk: &Chunk) -> Self {
        Self {
            page: chunk.page_or_default(),
            content: excerpt(&chunk.content, EXCERPT_CHARS),
        }
    }
}

/// First `max_chars` characters of `text` plus the excerpt marker
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let end = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    format!("{}{}", &text[..end], EXCERPT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_by_chars() {
        let text = "é".repeat(500);
        let short = excerpt(&text, EXCERPT_CHARS);

        assert!(short.ends_with(EXCERPT_MARKER));
        assert_eq!(short.chars().count(), EXCERPT_CHARS + EXCERPT_MARKER.len());
    }

    #[test]
    fn test_excerpt_short_text_still_marked() {
        assert_eq!(excerpt("brief", EXCERPT_CHARS), "brief...");
    }

    #[test]
    fn test_source_document_defaults_page() {
        let mut chunk = Chunk::new("content", "a.pdf", 3);
        assert_eq!(SourceDocument::from_chunk(&chunk).page, 3);

        chunk.metadata.page = None;
        let source = SourceDocument::from_chunk(&chunk);
        assert_eq!(source.page, 0);
        assert_eq!(source.content, "content...");
    }
}
