//! PDF text extraction backed by the pdf-extract crate.

use std::path::Path;

use tracing::debug;

use crate::domain::ingestion::TextExtractor;
use crate::domain::DomainError;

/// Extracts plain text from a PDF file.
///
/// Any failure (unreadable file, unparsable PDF) is a fatal source-read
/// error carrying the underlying cause; there is no partial extraction.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, DomainError> {
        let text = pdf_extract::extract_text(path).map_err(|e| {
            DomainError::source_read(format!("failed to read PDF '{}': {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            chars = text.len(),
            "Extracted text from PDF"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}
