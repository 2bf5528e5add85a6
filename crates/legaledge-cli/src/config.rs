//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use legaledge_analyzer::AnalyzerConfig;
use legaledge_llm::{gemini, ollama};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini API key unless a profile names another.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Analysis tuning
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Where this configuration is saved
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Model provider profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Provider backend
    pub provider: ProviderKind,

    /// Model name
    pub model: String,

    /// Endpoint override (provider default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds (provider default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Supported provider backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini
    Gemini,
    /// Local Ollama server
    Ollama,
}

impl ProviderKind {
    /// Model used when a profile does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_MODEL,
            ProviderKind::Ollama => "llama3",
        }
    }

    /// Endpoint used when a profile does not name one.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_ENDPOINT,
            ProviderKind::Ollama => ollama::DEFAULT_ENDPOINT,
        }
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the configuration and REPL history.
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".legaledge"))
    }

    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Load configuration from `path` (or the default location).
    ///
    /// A missing file yields the defaults, which are then written so the user
    /// has something to edit.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            config
                .analyzer
                .validate()
                .map_err(|e| CliError::Config(e.to_string()))?;
            config
        } else {
            let mut config = Self::default();
            config.path = Some(path.clone());
            config.save()?;
            config
        };

        config.path = Some(path);
        Ok(config)
    }

    /// Path this configuration is saved to.
    pub fn path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Self::default_path(),
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = self.path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::gemini(gemini::DEFAULT_MODEL));

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            analyzer: AnalyzerConfig::default(),
            path: None,
        }
    }
}

impl Profile {
    /// Gemini profile reading its key from `GEMINI_API_KEY`.
    pub fn gemini(model: impl Into<String>) -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: model.into(),
            endpoint: None,
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }

    /// Local Ollama profile.
    pub fn ollama(model: impl Into<String>) -> Self {
        Self {
            provider: ProviderKind::Ollama,
            ..Self::gemini(model)
        }
    }

    /// Endpoint in effect for this profile.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider.default_endpoint())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.provider, ProviderKind::Gemini);
        assert_eq!(profile.model, "gemini-2.0-flash");
        assert_eq!(profile.api_key_env, "GEMINI_API_KEY");
        assert!(config.settings.color);
        assert_eq!(config.analyzer.chat_window, 5);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        config.set_profile("local".to_string(), Profile::ollama("llama3"));
        assert!(config.profiles.contains_key("local"));

        config.switch_profile("local".to_string()).unwrap();
        assert_eq!(config.active_profile, "local");
        assert_eq!(
            config.get_active_profile().unwrap().endpoint(),
            "http://localhost:11434"
        );
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config.path().unwrap(), path);
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::load(Some(&path)).unwrap();
        let mut profile = Profile::ollama("mistral");
        profile.endpoint = Some("http://gpu-box:11434".to_string());
        profile.timeout_secs = Some(600);
        config.set_profile("gpu".to_string(), profile.clone());
        config.analyzer.max_similar_cases = 3;
        config.save().unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded.profiles.get("gpu"), Some(&profile));
        assert_eq!(reloaded.analyzer.max_similar_cases, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "active_profile = \"default\"\n\n[profiles.default]\nprovider = \"gemini\"\nmodel = \"gemini-1.5-pro\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.model, "gemini-1.5-pro");
        assert_eq!(profile.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.analyzer.max_document_chars, 8000);
    }

    #[test]
    fn test_invalid_analyzer_table_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[analyzer]\nchat_window = 0\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Config(_))));
    }
}
