//! LegalEdge CLI - Analyze legal-case PDFs and discuss them with an LLM.

use clap::Parser;
use legaledge_analyzer::Session;
use legaledge_cli::commands;
use legaledge_cli::repl;
use legaledge_cli::{Cli, Command, Config, Formatter};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing (log to stderr)
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> legaledge_cli::Result<()> {
    // Load or create config
    let mut config = Config::load(cli.config.as_deref())?;

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Stage lines only when stderr is a terminal
    let formatter =
        Formatter::new(format, color_enabled).with_progress(io::stderr().is_terminal());

    match cli.command {
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Some(Command::Analyze(args)) => {
            let assistant = commands::build_assistant(&config, cli.api_key.as_deref())?;
            let mut session = Session::new();
            commands::execute_analyze(&args.file, &assistant, &mut session, &formatter)?;
            if args.chat {
                repl::run_repl(&assistant, &mut session, &config, &formatter)?;
            }
        }
        None | Some(Command::Chat) => {
            let assistant = commands::build_assistant(&config, cli.api_key.as_deref())?;
            let mut session = Session::new();
            repl::run_repl(&assistant, &mut session, &config, &formatter)?;
        }
    }

    Ok(())
}
