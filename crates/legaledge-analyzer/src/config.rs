//! Configuration for the Analyzer

use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};

/// Configuration for case analysis and chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Characters of document text sent for detail extraction; the rest is cut
    pub max_document_chars: usize,

    /// Maximum similar cases requested and kept
    pub max_similar_cases: usize,

    /// Number of trailing transcript turns included in chat prompts
    pub chat_window: usize,

    /// Target length of the strength analysis (a request to the model, not enforced)
    pub analysis_target_words: usize,

    /// Legal system the precedents and answers should come from
    pub jurisdiction: String,

    /// Courts to focus the precedent search on
    pub courts_focus: String,
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.max_document_chars == 0 {
            return Err(AnalyzerError::Config(
                "max_document_chars must be greater than 0".to_string(),
            ));
        }
        if self.max_similar_cases == 0 {
            return Err(AnalyzerError::Config(
                "max_similar_cases must be greater than 0".to_string(),
            ));
        }
        if self.chat_window == 0 {
            return Err(AnalyzerError::Config(
                "chat_window must be greater than 0".to_string(),
            ));
        }
        if self.analysis_target_words == 0 {
            return Err(AnalyzerError::Config(
                "analysis_target_words must be greater than 0".to_string(),
            ));
        }
        if self.jurisdiction.trim().is_empty() {
            return Err(AnalyzerError::Config("jurisdiction must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_document_chars: 8_000,
            max_similar_cases: 5,
            chat_window: 5,
            analysis_target_words: 500,
            jurisdiction: "Indian".to_string(),
            courts_focus: "Supreme Court of India and High Courts".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Brief preset: less document text, fewer precedents, shorter answers
    pub fn brief() -> Self {
        Self {
            max_document_chars: 4_000,
            max_similar_cases: 3,
            chat_window: 3,
            analysis_target_words: 250,
            ..Self::default()
        }
    }

    /// Thorough preset: more document text and chat context, longer analysis
    pub fn thorough() -> Self {
        Self {
            max_document_chars: 16_000,
            max_similar_cases: 5,
            chat_window: 10,
            analysis_target_words: 800,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, AnalyzerError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| AnalyzerError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, AnalyzerError> {
        toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
