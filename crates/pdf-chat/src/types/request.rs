//! Chat request types

use serde::{Deserialize, Serialize};

/// One prior exchange: (question, answer)
pub type ChatTurn = (String, String);

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The new question
    pub message: String,
    /// Earlier exchanges, oldest first. Supplied by the caller on every turn.
    #[serde(default)]
    pub chat_history: Option<Vec<ChatTurn>>,
}

impl ChatRequest {
    /// Create a request with no history
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            chat_history: None,
        }
    }

    /// History, empty when omitted or null
    pub fn history(&self) -> &[ChatTurn] {
        self.chat_history.as_deref().unwrap_or(&[])
    }
}
