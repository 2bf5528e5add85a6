//! LegalEdge LLM Provider Layer
//!
//! Implementations of the `LlmProvider` gateway trait from `legaledge-domain`.
//! Every provider exposes the same narrow `generate(prompt) -> text` call and
//! reports failures as [`LlmError`]. Providers never retry; each call site in
//! the analyzer decides which fallback to substitute.
//!
//! # Providers
//!
//! - `GeminiProvider`: Google Gemini `generateContent` API (default)
//! - `OllamaProvider`: Local Ollama API integration
//! - `MockProvider`: Deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use legaledge_llm::MockProvider;
//! use legaledge_domain::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod ollama;

use legaledge_domain::LlmProvider;
use reqwest::blocking::Client;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

/// Blocking HTTP client shared by the network providers
pub(crate) fn build_client(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls. Rules
/// match on a substring of the prompt and are checked in the order they were
/// added; the first hit wins. Every prompt is recorded for inspection.
///
/// # Examples
///
/// ```
/// use legaledge_llm::MockProvider;
/// use legaledge_domain::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Responses keyed by prompt content
/// let mut provider = MockProvider::default();
/// provider.add_response("JSON object", "{}");
/// provider.add_error("landmark");
/// assert_eq!(provider.generate("return ONLY a JSON object").unwrap(), "{}");
/// assert!(provider.generate("5 similar landmark cases").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    rules: Vec<(String, Option<String>)>,
    fail_all: bool,
    prompts: Vec<String>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider whose every call fails
    pub fn failing() -> Self {
        let provider = Self::default();
        provider.lock().fail_all = true;
        provider
    }

    /// Respond with `response` to prompts containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        self.lock().rules.push((needle.into(), Some(response.into())));
    }

    /// Fail prompts containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        self.lock().rules.push((needle.into(), None));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Every prompt received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.lock().prompts.last().cloned()
    }

    /// Forget recorded prompts (and so reset the call count)
    pub fn reset_call_count(&self) {
        self.lock().prompts.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.lock();
        state.prompts.push(prompt.to_string());

        if state.fail_all {
            return Err(LlmError::Communication("Mock provider unavailable".to_string()));
        }

        let matched = state
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, response)| response.clone());

        match matched {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("say hello").unwrap(), "world");
        assert_eq!(provider.generate("foo?").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_first_rule_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("case", "first");
        provider.add_response("case details", "second");

        assert_eq!(provider.generate("case details").unwrap(), "first");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_prompt().as_deref(), Some("prompt2"));

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("a bad prompt");
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[test]
    fn test_mock_provider_failing() {
        let provider = MockProvider::failing();
        assert!(matches!(
            provider.generate("anything"),
            Err(LlmError::Communication(_))
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_build_client_accepts_timeouts() {
        assert!(build_client(Duration::from_secs(1)).is_ok());
        assert!(build_client(Duration::from_secs(300)).is_ok());
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
