use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::extract::TextExtractor;
use crate::llm::CompletionClient;
use crate::storage::DocumentStore;

pub type RecordId = i64;

// Database models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentRecord {
    pub id: RecordId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// Shared request state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub extractor: Arc<dyn TextExtractor>,
    pub completion: Arc<CompletionClient>,
    pub config: Arc<Config>,
}

// API request/response types
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub text: String,
}
