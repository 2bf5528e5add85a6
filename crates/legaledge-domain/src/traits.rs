//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::sync::Arc;

/// Gateway to a text-completion model
///
/// Implemented by the infrastructure layer (legaledge-llm). Calls are blocking
/// round-trips; implementations do not retry, callers decide how to recover.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a completion for `prompt`
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

impl<T: LlmProvider + ?Sized> LlmProvider for &T {
    type Error = T::Error;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).generate(prompt)
    }
}

impl<T: LlmProvider + ?Sized> LlmProvider for Arc<T> {
    type Error = T::Error;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).generate(prompt)
    }
}
