//! Analyze command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::provider::ConfiguredProvider;
use legaledge_analyzer::{LegalAssistant, Session};
use legaledge_domain::LlmProvider;
use std::fmt::Display;
use std::path::Path;
use tracing::info;

/// The assistant the CLI runs against.
pub type Assistant = LegalAssistant<ConfiguredProvider>;

/// Build an assistant for the active profile.
pub fn build_assistant(config: &Config, api_key: Option<&str>) -> Result<Assistant> {
    let profile = config.get_active_profile()?;
    let provider = ConfiguredProvider::from_profile(profile, api_key)?;
    info!(
        "Profile '{}' ready (model {})",
        config.active_profile,
        provider.model()
    );
    Ok(LegalAssistant::new(provider, config.analyzer.clone())?)
}

/// Analyze the PDF at `path` into `session` and print the result.
pub fn execute_analyze<L>(
    path: &Path,
    assistant: &LegalAssistant<L>,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
{
    let bytes = std::fs::read(path).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let run = assistant.analyze(session, &bytes, |stage| {
        if formatter.shows_progress() {
            if let Some(line) = formatter.stage(stage) {
                eprintln!("{}", line);
            }
        }
    })?;

    println!("{}", formatter.format_analysis(&run)?);
    Ok(())
}
