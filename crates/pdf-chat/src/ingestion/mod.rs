//! PDF ingestion: staging, text extraction, chunking and indexing

mod parser;
mod pipeline;
mod splitter;
mod staging;

pub use parser::PdfParser;
pub use pipeline::{IngestPipeline, IngestedDocument};
pub use splitter::TextSplitter;
pub use staging::StagedPdf;
