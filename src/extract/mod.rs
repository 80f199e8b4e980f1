//! Document text extraction
//!
//! Handlers only see the [`TextExtractor`] contract; [`PdfTextExtractor`]
//! is the implementation wired in by `main`.

pub mod pdf;

pub use pdf::PdfTextExtractor;

use async_trait::async_trait;
use crate::types::AppResult;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Turn a raw document payload into its plain text.
    ///
    /// Unparseable payloads fail with `AppError::Extraction`.
    async fn extract(&self, bytes: &[u8]) -> AppResult<String>;
}
