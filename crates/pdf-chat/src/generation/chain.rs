//! Conversational retrieval chain
//!
//! condense (history + follow-up -> standalone question) -> embed ->
//! top-k search -> answer prompt -> chat model.

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::retrieval::VectorIndex;
use crate::types::request::ChatTurn;
use crate::types::Chunk;

use super::prompt::PromptBuilder;

/// Answer plus the chunks it was conditioned on
#[derive(Debug, Clone)]
pub struct ChainOutput {
    /// Generated answer
    pub answer: String,
    /// Question used for retrieval, after condensing
    pub standalone_question: String,
    /// Retrieved chunks, best first
    pub source_documents: Vec<Chunk>,
}

/// Retrieval chain bound to one document index
pub struct ConversationalRetrievalChain {
    llm: Arc<dyn LlmProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<VectorIndex>,
    top_k: usize,
    condense_question: bool,
}

impl ConversationalRetrievalChain {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<VectorIndex>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            llm,
            embedder,
            index,
            top_k: config.top_k,
            condense_question: config.condense_question,
        }
    }

    /// Answer `question` in the context of `history`
    pub async fn invoke(&self, question: &str, history: &[ChatTurn]) -> Result<ChainOutput> {
        let standalone_question = self.standalone_question(question, history).await?;

        let query_embedding = self.embedder.embed_query(&standalone_question).await?;
        let results = self.index.search(&query_embedding, self.top_k)?;
        tracing::debug!(
            "Retrieved {} chunks (best similarity {:.3})",
            results.len(),
            results.first().map(|r| r.similarity).unwrap_or(0.0)
        );

        let context = PromptBuilder::build_context(&results);
        let prompt = PromptBuilder::build_answer_prompt(&context, history, &standalone_question);
        let answer = self.llm.generate(&prompt).await?;

        Ok(ChainOutput {
            answer: answer.trim().to_string(),
            standalone_question,
            source_documents: results.into_iter().map(|r| r.chunk).collect(),
        })
    }

    async fn standalone_question(&self, question: &str, history: &[ChatTurn]) -> Result<String> {
        if history.is_empty() || !self.condense_question {
            return Ok(question.to_string());
        }

        let prompt = PromptBuilder::build_condense_prompt(history, question);
        let condensed = self.llm.generate(&prompt).await?;
        let condensed = condensed.trim();

        if condensed.is_empty() {
            Ok(question.to_string())
        } else {
            tracing::debug!("Condensed follow-up into: {}", condensed);
            Ok(condensed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{EchoLlm, FailingEmbedder, LetterEmbedder};

    async fn index_of(texts: &[&str]) -> Arc<VectorIndex> {
        let chunks: Vec<Chunk> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(*t, "doc.pdf", i as u32))
            .collect();
        Arc::new(VectorIndex::build(&chunks, &LetterEmbedder).await.unwrap())
    }

    fn chain(llm: Arc<EchoLlm>, index: Arc<VectorIndex>, condense: bool) -> ConversationalRetrievalChain {
        let config = RetrievalConfig {
            top_k: 2,
            condense_question: condense,
        };
        ConversationalRetrievalChain::new(llm, Arc::new(LetterEmbedder), index, &config)
    }

    #[tokio::test]
    async fn test_first_turn_skips_condense() {
        let llm = Arc::new(EchoLlm::default());
        let index = index_of(&["zebra zoo zigzag", "apple banana", "quiz buzz"]).await;
        let output = chain(llm.clone(), index, true).invoke("zebra", &[]).await.unwrap();

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Question: zebra"));
        assert_eq!(output.standalone_question, "zebra");
        assert_eq!(output.source_documents.len(), 2);
        assert_eq!(output.source_documents[0].content, "zebra zoo zigzag");
        assert!(output.answer.starts_with("echo: Use the following pieces of context"));
    }

    #[tokio::test]
    async fn test_follow_up_is_condensed() {
        let llm = Arc::new(EchoLlm::default());
        let index = index_of(&["alpha", "beta"]).await;
        let history = vec![("What is alpha?".to_string(), "A letter.".to_string())];

        let output = chain(llm.clone(), index, true).invoke("And beta?", &history).await.unwrap();

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Follow Up Input: And beta?"));
        assert!(output.standalone_question.starts_with("echo: Given the following conversation"));
        assert!(prompts[1].contains("Chat History:\nHuman: What is alpha?\nAssistant: A letter."));
    }

    #[tokio::test]
    async fn test_condense_disabled() {
        let llm = Arc::new(EchoLlm::default());
        let index = index_of(&["alpha"]).await;
        let history = vec![("q".to_string(), "a".to_string())];

        let output = chain(llm.clone(), index, false).invoke("alpha?", &history).await.unwrap();
        assert_eq!(llm.prompts().len(), 1);
        assert_eq!(output.standalone_question, "alpha?");
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let index = index_of(&["alpha"]).await;
        let chain = ConversationalRetrievalChain::new(
            Arc::new(EchoLlm::default()),
            Arc::new(FailingEmbedder("Quota exceeded")),
            index,
            &RetrievalConfig::default(),
        );
        let err = chain.invoke("alpha?", &[]).await.unwrap_err();
        assert!(err.to_string().contains("Quota exceeded"));
    }
}
