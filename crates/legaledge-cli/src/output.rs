//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use legaledge_analyzer::{AnalysisStage, CaseAnalysis, ChatReply};
use legaledge_domain::{AnalysisResult, CaseDetails, Role, SimilarCase, Transcript};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    progress: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
            progress: false,
        }
    }

    /// Print stage lines while an analysis runs.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Format a whole analysis run.
    pub fn format_analysis(&self, run: &CaseAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "case_details": details_json(&run.case_details),
                    "similar_cases": cases_json(&run.similar_cases),
                    "analysis": run.analysis.text,
                    "fallbacks": {
                        "case_details": run.details_fallback,
                        "similar_cases": run.similar_cases_fallback,
                        "analysis": run.analysis.was_fallback,
                    },
                    "metadata": {
                        "page_count": run.metadata.page_count,
                        "document_chars": run.metadata.document_chars,
                        "truncated": run.metadata.truncated,
                        "processing_time_ms": run.metadata.processing_time_ms,
                    },
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&self.heading("Case Details"));
                out.push('\n');
                out.push_str(&self.format_case_details(&run.case_details)?);
                out.push_str("\n\n");
                out.push_str(&self.heading("Similar Cases"));
                out.push('\n');
                out.push_str(&self.format_similar_cases(&run.similar_cases)?);
                out.push_str("\n\n");
                out.push_str(&self.heading("Case Analysis"));
                out.push('\n');
                out.push_str(&self.format_report(&run.analysis));
                if run.used_fallback() {
                    out.push_str("\n\n");
                    out.push_str(&self.warning(
                        "Some stages fell back to defaults because the model call failed.",
                    ));
                }
                Ok(out)
            }
            OutputFormat::Quiet => Ok(run.analysis.text.clone()),
        }
    }

    /// Format extracted case details.
    pub fn format_case_details(&self, details: &CaseDetails) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&details_json(details))?),
            OutputFormat::Quiet => Ok(details.title.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Title", or_dash(&details.title)]);
                builder.push_record(["Court", or_dash(&details.court)]);
                builder.push_record(["Type", details.case_type.as_str()]);
                builder.push_record(["Issues", or_dash(&details.issues_joined())]);
                builder.push_record(["Statutes", or_dash(&details.statutes_joined())]);
                builder.push_record(["Key Facts", or_dash(&details.key_facts)]);
                builder.push_record(["Relief Sought", or_dash(&details.relief_sought)]);
                builder.push_record(["Arguments", or_dash(&details.arguments_summary)]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
        }
    }

    /// Format the similar-case list.
    pub fn format_similar_cases(&self, cases: &[SimilarCase]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&cases_json(cases))?),
            OutputFormat::Quiet => Ok(cases
                .iter()
                .map(|c| c.title.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if cases.is_empty() {
                    return Ok(self.colorize("No similar cases found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Case", "Description"]);
                for (i, case) in cases.iter().enumerate() {
                    builder.push_record([
                        (i + 1).to_string(),
                        case.title.clone(),
                        case.description.clone(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
        }
    }

    /// Format the strength analysis.
    pub fn format_report(&self, analysis: &AnalysisResult) -> String {
        if analysis.was_fallback {
            self.error(&analysis.text)
        } else {
            analysis.text.clone()
        }
    }

    /// Format an assistant reply.
    pub fn format_reply(&self, reply: &ChatReply) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "reply": reply.text,
                "was_fallback": reply.was_fallback,
            }))?),
            _ if reply.was_fallback => Ok(self.warning(&reply.text)),
            _ => Ok(reply.text.clone()),
        }
    }

    /// Format the conversation so far.
    pub fn format_transcript(&self, transcript: &Transcript) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let turns: Vec<Value> = transcript
                    .turns()
                    .iter()
                    .map(|t| json!({ "role": t.role.as_str(), "content": t.content }))
                    .collect();
                Ok(serde_json::to_string_pretty(&turns)?)
            }
            _ if transcript.is_empty() => Ok(self.info("No messages yet.")),
            _ => {
                let lines: Vec<String> = transcript
                    .turns()
                    .iter()
                    .map(|t| {
                        let speaker = match t.role {
                            Role::User => self.colorize("You", "cyan"),
                            Role::Assistant => self.colorize("Assistant", "magenta"),
                        };
                        format!("{}: {}", speaker, t.content)
                    })
                    .collect();
                Ok(lines.join("\n\n"))
            }
        }
    }

    /// Progress line for the work that follows `stage`.
    pub fn stage(&self, stage: AnalysisStage) -> Option<String> {
        stage.next_action().map(|action| self.colorize(action, "blue"))
    }

    /// True when stage lines should go to stderr.
    pub fn shows_progress(&self) -> bool {
        self.progress
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, title: &str) -> String {
        if self.color_enabled {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn details_json(details: &CaseDetails) -> Value {
    json!({
        "case_title": details.title,
        "court": details.court,
        "case_type": details.case_type.as_str(),
        "main_issues": details.main_issues,
        "statutes_involved": details.statutes_involved,
        "key_facts": details.key_facts,
        "relief_sought": details.relief_sought,
        "arguments_summary": details.arguments_summary,
    })
}

fn cases_json(cases: &[SimilarCase]) -> Value {
    cases
        .iter()
        .map(|c| json!({ "title": c.title, "description": c.description }))
        .collect()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
