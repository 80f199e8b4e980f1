// Google Gemini adapter
// API Reference: https://ai.google.dev/api/generate-content

use crate::config::DEFAULT_GEMINI_API_BASE;
use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest, LLMResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct GeminiAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

// Request types for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// Response types
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl GeminiAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_GEMINI_API_BASE)
    }

    /// Point the adapter at another API root, e.g. a proxy or a test server
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn convert_message(msg: &LLMMessage) -> GeminiContent {
        GeminiContent {
            role: msg.role.clone(),
            parts: vec![GeminiPart {
                text: msg.content.clone(),
            }],
        }
    }

    fn build_request(request: &LLMRequest) -> GenerateContentRequest {
        let generation_config = if request.max_tokens.is_some() || request.temperature.is_some() {
            Some(GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            })
        } else {
            None
        };

        GenerateContentRequest {
            contents: request.messages.iter().map(Self::convert_message).collect(),
            generation_config,
        }
    }
}

#[async_trait]
impl LLMAdapter for GeminiAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = self.endpoint(&request.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::build_request(request))
            .send()
            .await
            .map_err(|e| AppError::llm(format!("Gemini request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            // Relay the upstream body verbatim, as JSON when it is JSON.
            // Without a body, the status message is the detail.
            let payload = response
                .text()
                .await
                .ok()
                .filter(|text| !text.trim().is_empty())
                .map(|text| {
                    serde_json::from_str::<serde_json::Value>(&text)
                        .unwrap_or(serde_json::Value::String(text))
                });

            return Err(AppError::LLMApi {
                message: format!("Gemini API error ({})", status),
                payload,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::llm(format!("Failed to parse Gemini response: {}", e)))?;

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::llm("Gemini returned no candidates"))?;

        let content = candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| AppError::llm("Gemini candidate has no text"))?;

        let usage = body.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        if let Some(usage) = &usage {
            debug!(
                model = %request.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Token usage"
            );
        }

        Ok(LLMResponse {
            content,
            finish_reason: candidate.finish_reason,
            usage,
        })
    }
}
