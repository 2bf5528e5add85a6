//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis pipeline error
    #[error(transparent)]
    Analyzer(#[from] legaledge_analyzer::AnalyzerError),

    /// Provider construction error
    #[error("Provider error: {0}")]
    Llm(#[from] legaledge_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// No credential for a provider that needs one
    #[error("No API key found. Pass --api-key or set {0}.")]
    MissingApiKey(String),

    /// Case command used before any document was analyzed
    #[error("No case analyzed yet. Use 'analyze <file>' first.")]
    NotAnalyzed,
}
