use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::LLMConfig;
use crate::types::{AppResult, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Framing used for every document question.
pub fn document_prompt(text: &str, question: &str) -> String {
    format!("The following is a document:\n\n{text}\n\nUser's question: {question}")
}

/// Answers questions about a document through an [`LLMAdapter`].
///
/// Every call goes upstream; nothing is cached or retried.
pub struct CompletionClient {
    adapter: Arc<dyn LLMAdapter>,
    model: String,
}

impl CompletionClient {
    pub fn new(adapter: Arc<dyn LLMAdapter>, model: impl Into<String>) -> Self {
        Self {
            adapter,
            model: model.into(),
        }
    }

    /// Client talking to Gemini with the configured key and model
    pub fn gemini(config: &LLMConfig) -> Self {
        let adapter = crate::llm::gemini::GeminiAdapter::with_base_url(
            &config.gemini_api_key,
            &config.gemini_api_base,
        );
        Self::new(Arc::new(adapter), config.gemini_model.clone())
    }

    pub async fn answer(&self, text: &str, question: &str) -> AppResult<String> {
        let request = LLMRequest::user_prompt(&self.model, document_prompt(text, question));
        let response = self.adapter.create_chat_completion(&request).await?;

        debug!(
            model = %self.model,
            finish_reason = ?response.finish_reason,
            "Completion received"
        );
        Ok(response.content)
    }
}
