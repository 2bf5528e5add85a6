//! Provider selection from the active profile.

use crate::config::{Profile, ProviderKind};
use crate::error::{CliError, Result};
use legaledge_domain::LlmProvider;
use legaledge_llm::{GeminiProvider, LlmError, OllamaProvider};
use std::time::Duration;
use tracing::debug;

/// The provider a profile resolves to.
pub enum ConfiguredProvider {
    /// Google Gemini
    Gemini(GeminiProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl ConfiguredProvider {
    /// Build the provider described by `profile`.
    ///
    /// `api_key` wins over the profile's key variable. Only Gemini needs a key.
    pub fn from_profile(profile: &Profile, api_key: Option<&str>) -> Result<Self> {
        debug!(
            "Using {:?} provider, model '{}' at {}",
            profile.provider,
            profile.model,
            profile.endpoint()
        );

        let provider = match profile.provider {
            ProviderKind::Gemini => {
                let key = resolve_api_key(profile, api_key)?;
                let mut provider = GeminiProvider::new(key, &profile.model)?
                    .with_endpoint(profile.endpoint());
                if let Some(secs) = profile.timeout_secs {
                    provider = provider.with_timeout(Duration::from_secs(secs))?;
                }
                ConfiguredProvider::Gemini(provider)
            }
            ProviderKind::Ollama => {
                let mut provider = OllamaProvider::new(profile.endpoint(), &profile.model)?;
                if let Some(secs) = profile.timeout_secs {
                    provider = provider.with_timeout(Duration::from_secs(secs))?;
                }
                ConfiguredProvider::Ollama(provider)
            }
        };

        Ok(provider)
    }

    /// Model name in use.
    pub fn model(&self) -> &str {
        match self {
            ConfiguredProvider::Gemini(p) => p.model(),
            ConfiguredProvider::Ollama(p) => p.model(),
        }
    }
}

impl LlmProvider for ConfiguredProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> std::result::Result<String, Self::Error> {
        match self {
            ConfiguredProvider::Gemini(p) => p.generate(prompt),
            ConfiguredProvider::Ollama(p) => p.generate(prompt),
        }
    }
}

fn resolve_api_key(profile: &Profile, explicit: Option<&str>) -> Result<String> {
    if let Some(key) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    match std::env::var(&profile.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(CliError::MissingApiKey(profile.api_key_env.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins() {
        let profile = Profile::gemini("gemini-2.0-flash");
        let provider = ConfiguredProvider::from_profile(&profile, Some("explicit-key")).unwrap();
        assert!(matches!(provider, ConfiguredProvider::Gemini(_)));
        assert_eq!(provider.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_missing_key_names_variable() {
        let mut profile = Profile::gemini("gemini-2.0-flash");
        profile.api_key_env = "LEGALEDGE_TEST_KEY_THAT_IS_NEVER_SET".to_string();

        match ConfiguredProvider::from_profile(&profile, None) {
            Err(CliError::MissingApiKey(var)) => {
                assert_eq!(var, "LEGALEDGE_TEST_KEY_THAT_IS_NEVER_SET")
            }
            _ => panic!("Expected MissingApiKey"),
        }
    }

    #[test]
    fn test_blank_explicit_key_is_ignored() {
        let mut profile = Profile::gemini("gemini-2.0-flash");
        profile.api_key_env = "LEGALEDGE_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        assert!(ConfiguredProvider::from_profile(&profile, Some("   ")).is_err());
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let mut profile = Profile::ollama("llama3");
        profile.api_key_env = "LEGALEDGE_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        profile.timeout_secs = Some(30);

        let provider = ConfiguredProvider::from_profile(&profile, None).unwrap();
        assert!(matches!(provider, ConfiguredProvider::Ollama(_)));
        assert_eq!(provider.model(), "llama3");
    }
}
