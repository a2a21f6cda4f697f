//! Document text extraction.
//!
//! The extractor is an opaque collaborator behind a trait object in
//! `AppState`: handlers never name a concrete format library, and tests can
//! substitute a stub instead of shipping real PDF fixtures.

use crate::errors::AppError;

pub trait DocumentExtractor: Send + Sync {
    /// Converts uploaded document bytes into plain text. Any failure means
    /// the whole request fails; there is no partial scoring.
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError>;
}

/// PDF extraction via `pdf-extract`. The only format the wizard uploads.
pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("Failed to parse PDF: {e}")))
    }
}
