//! Page-by-page PDF text extraction

use lopdf::{Document, ObjectId};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Page;

/// PDF parser producing one `Page` per physical page
pub struct PdfParser;

impl PdfParser {
    /// Load the PDF at `path` and extract the text of every page, in order.
    /// Page numbers are 0-indexed.
    pub fn extract_pages(path: &Path) -> Result<Vec<Page>> {
        let doc = Document::load(path)
            .map_err(|e| Error::parse(format!("Failed to load PDF: {}", e)))?;
        Self::pages_from_document(&doc)
    }

    #[cfg(test)]
    fn extract_pages_from_mem(data: &[u8]) -> Result<Vec<Page>> {
        let doc = Document::load_mem(data)
            .map_err(|e| Error::parse(format!("Failed to load PDF: {}", e)))?;
        Self::pages_from_document(&doc)
    }

    fn pages_from_document(doc: &Document) -> Result<Vec<Page>> {
        let page_ids = doc.get_pages();
        if page_ids.is_empty() {
            return Err(Error::parse("PDF has no pages"));
        }

        let mut pages = Vec::with_capacity(page_ids.len());
        for (index, (page_num, page_id)) in page_ids.into_iter().enumerate() {
            let raw = match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("lopdf text extraction failed for page {}: {}, scanning content stream", page_num, e);
                    Self::extract_from_content_stream(doc, page_id, page_num)
                }
            };
            pages.push(Page::new(index as u32, cleanup_pdf_text(&raw)));
        }

        Ok(pages)
    }

    /// Fallback: pull literal strings out of the page's BT/ET text blocks
    fn extract_from_content_stream(doc: &Document, page_id: ObjectId, page_num: u32) -> String {
        let content = match doc.get_page_content(page_id) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Could not get content for page {}: {}", page_num, e);
                return String::new();
            }
        };

        let content_str = String::from_utf8_lossy(&content);
        let mut text = String::new();
        let mut in_text_block = false;

        for line in content_str.lines() {
            let line = line.trim();
            match line {
                "BT" => in_text_block = true,
                "ET" => {
                    in_text_block = false;
                    text.push('\n');
                }
                _ if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) => {
                    if let (Some(start), Some(end)) = (line.find('('), line.rfind(')')) {
                        if start < end {
                            text.push_str(&decode_pdf_string(&line[start + 1..end]));
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }
}

/// Decode basic escapes in a PDF literal string
fn decode_pdf_string(s: &str) -> String {
    s.replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
        .replace("\\(", "(")
        .replace("\\)", ")")
        .replace("\\\\", "\\")
}

/// Normalise extracted text: drop NULs, expand ligatures, trim line ends and
/// collapse runs of blank lines so paragraph breaks survive as "\n\n".
fn cleanup_pdf_text(text: &str) -> String {
    let normalised = text
        .replace('\0', "")
        .replace('\u{00A0}', " ")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl");

    let mut out = String::with_capacity(normalised.len());
    let mut blank_run = 0;
    for line in normalised.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}
