//! PDF text extraction
//!
//! Turns an uploaded PDF into plain text, one page at a time. A page whose
//! text cannot be decoded contributes nothing instead of failing the whole
//! document; only a file that cannot be parsed as a PDF at all is an error.

use crate::error::AnalyzerError;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// Extracts plain text from PDF bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Text of every page, in page order
    ///
    /// Pages that fail to decode yield an empty string.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, AnalyzerError> {
        let document = Document::load_mem(bytes)?;
        let pages = document.get_pages();

        debug!("Loaded PDF with {} pages", pages.len());

        let texts = pages
            .keys()
            .map(|&page_number| match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        Ok(texts)
    }

    /// Whole-document text: each page's text followed by a newline
    pub fn extract(&self, bytes: &[u8]) -> Result<String, AnalyzerError> {
        Ok(join_pages(&self.extract_pages(bytes)?))
    }

    /// Read a PDF file and extract its text
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<String, AnalyzerError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            AnalyzerError::Extraction(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.extract(&bytes)
    }
}

/// Concatenate page texts, each followed by `\n`
pub(crate) fn join_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text
}
