//! In-memory vector index over document chunks

mod index;

pub use index::{SearchResult, VectorIndex};
