//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use legaledge_analyzer::{LegalAssistant, QuickQuestion, Session};
use legaledge_domain::LlmProvider;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::fmt::Display;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl<L>(
    assistant: &LegalAssistant<L>,
    session: &mut Session,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
{
    println!(
        "{}",
        formatter.info("LegalEdge - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    // Initialize readline editor
    let editor_config = EditorConfig::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = if session.is_analyzed() {
            "legaledge> "
        } else {
            "legaledge (no case)> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_line(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, assistant, session, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    Analyze(PathBuf),
    Details,
    Cases,
    Report,
    History,
    Quick(QuickQuestion),
    Clear,
    Ask(String),
}

/// Parse a REPL line. Anything that is not a command is a question.
fn parse_repl_line(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match (head, rest.is_empty()) {
        ("exit" | "quit" | "q", true) => ReplCommand::Exit,
        ("help" | "?", true) => ReplCommand::Help,
        ("details", true) => ReplCommand::Details,
        ("cases", true) => ReplCommand::Cases,
        ("report", true) => ReplCommand::Report,
        ("history", true) => ReplCommand::History,
        ("clear", true) => ReplCommand::Clear,
        ("analyze", true) => {
            return Err(CliError::InvalidInput("Usage: analyze <file>".to_string()));
        }
        ("analyze", false) => ReplCommand::Analyze(PathBuf::from(rest)),
        ("quick", _) => {
            let question = QuickQuestion::parse(rest).ok_or_else(|| {
                let keywords: Vec<&str> = QuickQuestion::ALL.iter().map(|q| q.keyword()).collect();
                CliError::InvalidInput(format!("Usage: quick <{}>", keywords.join("|")))
            })?;
            ReplCommand::Quick(question)
        }
        _ => ReplCommand::Ask(line.to_string()),
    };

    Ok(command)
}

/// Execute a REPL command.
fn execute_repl_command<L>(
    cmd: ReplCommand,
    assistant: &LegalAssistant<L>,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
{
    match cmd {
        ReplCommand::Analyze(path) => {
            commands::execute_analyze(&path, assistant, session, formatter)?;
        }
        ReplCommand::Clear => {
            assistant.conversation().reset_transcript(session);
            println!("{}", formatter.success("Chat history cleared"));
        }
        ReplCommand::History => {
            println!("{}", formatter.format_transcript(session.transcript())?);
        }
        ReplCommand::Exit | ReplCommand::Help => {}
        _ if !session.is_analyzed() => return Err(CliError::NotAnalyzed),
        ReplCommand::Details => {
            println!("{}", formatter.format_case_details(session.case_details())?);
        }
        ReplCommand::Cases => {
            println!("{}", formatter.format_similar_cases(session.similar_cases())?);
        }
        ReplCommand::Report => {
            if let Some(analysis) = session.analysis() {
                println!("{}", formatter.format_report(analysis));
            }
        }
        ReplCommand::Quick(question) => {
            println!("{}", formatter.info(question.text()));
            let reply = assistant.ask_quick(session, question);
            println!("{}", formatter.format_reply(&reply)?);
        }
        ReplCommand::Ask(question) => {
            if let Some(reply) = assistant.ask(session, &question) {
                println!("{}", formatter.format_reply(&reply)?);
            }
        }
    }

    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        e
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  analyze <file>                 - Analyze a case PDF");
    println!("  details                        - Show extracted case details");
    println!("  cases                          - Show similar cases");
    println!("  report                         - Show the strength analysis");
    println!("  quick <chances|arguments|research>");
    println!("                                 - Ask a quick question");
    println!("  history                        - Show the conversation");
    println!("  clear                          - Clear the conversation");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
    println!("  Anything else is a question about the analyzed case.");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use legaledge_analyzer::AnalyzerConfig;
    use legaledge_llm::MockProvider;

    fn quiet() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_repl_line("exit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_line("  details ").unwrap(), ReplCommand::Details);
        assert_eq!(
            parse_repl_line("analyze /tmp/my case.pdf").unwrap(),
            ReplCommand::Analyze(PathBuf::from("/tmp/my case.pdf"))
        );
        assert_eq!(
            parse_repl_line("quick Research").unwrap(),
            ReplCommand::Quick(QuickQuestion::Research)
        );
    }

    #[test]
    fn test_sentences_are_questions() {
        assert_eq!(
            parse_repl_line("clear the doubts about limitation").unwrap(),
            ReplCommand::Ask("clear the doubts about limitation".to_string())
        );
        assert_eq!(
            parse_repl_line("What relief can I claim?").unwrap(),
            ReplCommand::Ask("What relief can I claim?".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_repl_line("analyze").is_err());
        assert!(parse_repl_line("quick").is_err());
        assert!(parse_repl_line("quick appeal").is_err());
    }

    #[test]
    fn test_case_commands_need_an_analysis() {
        let llm = MockProvider::default();
        let assistant = LegalAssistant::new(llm.clone(), AnalyzerConfig::default()).unwrap();
        let mut session = Session::new();

        for cmd in [
            ReplCommand::Details,
            ReplCommand::Ask("What now?".to_string()),
            ReplCommand::Quick(QuickQuestion::Chances),
        ] {
            let result = execute_repl_command(cmd, &assistant, &mut session, &quiet());
            assert!(matches!(result, Err(CliError::NotAnalyzed)));
        }
        assert_eq!(llm.call_count(), 0);

        execute_repl_command(ReplCommand::History, &assistant, &mut session, &quiet()).unwrap();
    }

    #[test]
    fn test_question_and_clear_after_analysis() {
        let llm = MockProvider::new("reply");
        let assistant = LegalAssistant::new(llm.clone(), AnalyzerConfig::default()).unwrap();
        let mut session = Session::new();
        assistant
            .analyzer()
            .analyze_text(&mut session, "Case: X vs. Y")
            .unwrap();

        execute_repl_command(
            ReplCommand::Ask("Is there a limitation issue?".to_string()),
            &assistant,
            &mut session,
            &quiet(),
        )
        .unwrap();
        assert_eq!(session.transcript().len(), 2);

        execute_repl_command(ReplCommand::Clear, &assistant, &mut session, &quiet()).unwrap();
        assert!(session.transcript().is_empty());
    }
}
