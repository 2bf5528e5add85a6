//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LegalEdge - Analyze legal-case PDFs and discuss them with an LLM.
#[derive(Debug, Parser)]
#[command(name = "legaledge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Gemini API key (overrides the profile's key variable)
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (analysis text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a case PDF
    Analyze(AnalyzeArgs),

    /// Enter interactive chat mode
    Chat,

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// PDF file to analyze
    pub file: PathBuf,

    /// Continue in chat mode after the analysis
    #[arg(long)]
    pub chat: bool,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Provider backend
        #[arg(long, value_enum, default_value = "gemini")]
        provider: ProviderArg,
        /// Model name (provider default when omitted)
        #[arg(short, long)]
        model: Option<String>,
        /// Endpoint URL
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,
        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// Google Gemini
    Gemini,
    /// Local Ollama server
    Ollama,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProviderArg> for crate::config::ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Gemini => crate::config::ProviderKind::Gemini,
            ProviderArg::Ollama => crate::config::ProviderKind::Ollama,
        }
    }
}
