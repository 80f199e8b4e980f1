//! PDF text extractor backed by lopdf.

use async_trait::async_trait;
use lopdf::Document;
use tracing::debug;

use super::TextExtractor;
use crate::types::{AppError, AppResult};

/// Extractor for PDF payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        // Parsing is CPU-bound, keep it off the request task
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            .map_err(|e| AppError::Internal(format!("Task join error: {e}")))?
    }
}

/// Extract the text of every page, in page order.
fn extract_pdf_text(bytes: &[u8]) -> AppResult<String> {
    let doc = Document::load_mem(bytes).map_err(|e| AppError::Extraction(e.to_string()))?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Ok(String::new());
    }

    let text = doc
        .extract_text(&page_numbers)
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    debug!(
        "Extracted {} characters from {} page(s)",
        text.len(),
        page_numbers.len()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn pdf_with_text(lines: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in lines {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[tokio::test]
    async fn test_extracts_text_from_pdf() {
        let bytes = pdf_with_text(&["Hello World!"]);

        let text = PdfTextExtractor::new().extract(&bytes).await.unwrap();
        assert!(text.contains("Hello World!"), "got {text:?}");
    }

    #[tokio::test]
    async fn test_pages_are_extracted_in_order() {
        let bytes = pdf_with_text(&["First page", "Second page"]);

        let text = PdfTextExtractor::new().extract(&bytes).await.unwrap();
        let first = text.find("First page").unwrap();
        let second = text.find("Second page").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_rejects_non_pdf_payload() {
        let err = PdfTextExtractor::new()
            .extract(b"definitely not a pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_rejects_empty_payload() {
        let err = PdfTextExtractor::new().extract(&[]).await.unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
