//! services/api/src/adapters/parser.rs
//!
//! Stand-in for transcript text extraction. It implements the `DocumentParser`
//! port but ignores the uploaded bytes entirely; a real parser has to keep the
//! same `(bytes, type) -> text` contract.

use async_trait::async_trait;
use lexinary_core::domain::DocumentType;
use lexinary_core::ports::{DocumentParser, PortResult};
use tracing::debug;

const SAMPLE_PHRASE: &str = "Sample transcript text ";
const SAMPLE_REPEATS: usize = 100;

#[derive(Clone, Debug, Default)]
pub struct MockDocumentParser;

#[async_trait]
impl DocumentParser for MockDocumentParser {
    async fn extract_text(&self, file_bytes: &[u8], kind: DocumentType) -> PortResult<String> {
        debug!(bytes = file_bytes.len(), kind = kind.as_str(), "Mock parsing upload");
        Ok(SAMPLE_PHRASE.repeat(SAMPLE_REPEATS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_fixed_transcript_for_any_input() {
        let parser = MockDocumentParser;
        let pdf = parser.extract_text(b"%PDF-1.7", DocumentType::Pdf).await.unwrap();
        let docx = parser.extract_text(b"PK\x03\x04", DocumentType::Docx).await.unwrap();
        assert_eq!(pdf, docx);
        assert_eq!(pdf.split_whitespace().count(), 300);
    }
}
