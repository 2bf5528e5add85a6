//! LegalEdge Analyzer
//!
//! Turns a legal-case PDF into structured case details, a short list of
//! similar precedents and a strength assessment, then answers follow-up
//! questions about the case.
//!
//! # Architecture
//!
//! ```text
//! PDF → text → LLM → CaseDetails → LLM → SimilarCase[] → LLM → AnalysisResult
//!                                                                    ↓
//!                                   question + window(transcript) → LLM → reply
//! ```
//!
//! Model failures never abort a run. Each stage substitutes a fallback and
//! flags it, so callers always get a complete [`CaseAnalysis`]. The only
//! errors are documents that cannot be read or contain no text.
//!
//! # Example Usage
//!
//! ```
//! use legaledge_analyzer::{AnalyzerConfig, LegalAssistant, Session};
//! use legaledge_domain::CaseType;
//! use legaledge_llm::MockProvider;
//!
//! let mut llm = MockProvider::new("Consider the limitation period.");
//! llm.add_response(
//!     "ONLY a JSON object",
//!     r#"{"case_title": "X vs. Y", "case_type": "civil"}"#,
//! );
//!
//! let assistant = LegalAssistant::new(llm, AnalyzerConfig::default()).unwrap();
//! let mut session = Session::new();
//!
//! let run = assistant
//!     .analyzer()
//!     .analyze_text(&mut session, "Case: X vs. Y, breach of contract")
//!     .unwrap();
//! assert_eq!(run.case_details.case_type, CaseType::Civil);
//!
//! let reply = assistant.ask(&mut session, "What should I check first?").unwrap();
//! assert_eq!(reply.text, "Consider the limitation period.");
//! assert_eq!(session.transcript().len(), 2);
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod prompt;
mod parser;
mod pdf;
mod session;
mod analyzer;
mod conversation;
mod assistant;


pub use error::AnalyzerError;
pub use config::AnalyzerConfig;
pub use types::{AnalysisMetadata, AnalysisStage, CaseAnalysis, ChatReply, QuickQuestion};
pub use prompt::{truncate_chars, PromptBuilder};
pub use parser::{parse_case_details, parse_similar_cases, ParsedDetails};
pub use pdf::PdfTextExtractor;
pub use session::Session;
pub use analyzer::{CaseAnalyzer, ANALYSIS_FAILED};
pub use conversation::ConversationManager;
pub use assistant::LegalAssistant;
