//! Prompt templates for conversational retrieval

use crate::retrieval::SearchResult;
use crate::types::request::ChatTurn;

/// Prompt builder for the condense and answer steps
pub struct PromptBuilder;

impl PromptBuilder {
    /// Render history as "\nHuman: q\nAssistant: a" per exchange
    pub fn format_history(history: &[ChatTurn]) -> String {
        history
            .iter()
            .map(|(question, answer)| format!("\nHuman: {}\nAssistant: {}", question, answer))
            .collect()
    }

    /// Join the full text of each retrieved chunk with blank lines
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Prompt that rewrites a follow-up into a standalone question
    pub fn build_condense_prompt(history: &[ChatTurn], question: &str) -> String {
        format!(
            "Given the following conversation and a follow up question, rephrase the follow up question to be a standalone question, in its original language.\n\n\
             Chat History:\n{chat_history}\n\
             Follow Up Input: {question}\n\
             Standalone question:",
            chat_history = Self::format_history(history),
            question = question
        )
    }

    /// Grounded answer prompt over the retrieved context
    pub fn build_answer_prompt(context: &str, history: &[ChatTurn], question: &str) -> String {
        let history_section = if history.is_empty() {
            String::new()
        } else {
            format!("Chat History:{}\n\n", Self::format_history(history))
        };

        format!(
            "Use the following pieces of context to answer the question at the end. If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\n\
             {context}\n\n\
             {history_section}\
             Question: {question}\n\
             Helpful Answer:",
            context = context,
            history_section = history_section,
            question = question
        )
    }
}
