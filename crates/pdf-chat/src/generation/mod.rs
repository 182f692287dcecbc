//! Answer generation over a retrieved context

pub mod chain;
pub mod prompt;

pub use chain::{ChainOutput, ConversationalRetrievalChain};
pub use prompt::PromptBuilder;
