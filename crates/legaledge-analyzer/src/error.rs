//! Error types for the Analyzer

use thiserror::Error;

/// Errors that can stop an analysis run
///
/// Model failures never appear here: every gateway error is replaced by a
/// fallback value at the stage where it happened.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Input could not be read as a PDF
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    /// Document parsed but yielded no text
    #[error("Document contains no extractable text")]
    EmptyDocument,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalyzerError {
    /// True for the failures that mean "this document cannot be analyzed"
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, AnalyzerError::Extraction(_) | AnalyzerError::EmptyDocument)
    }
}

impl From<lopdf::Error> for AnalyzerError {
    fn from(e: lopdf::Error) -> Self {
        AnalyzerError::Extraction(e.to_string())
    }
}
