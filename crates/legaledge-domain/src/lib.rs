//! LegalEdge Domain Layer
//!
//! Core value types for one case-analysis session and the trait boundary to
//! the language model. Like the rest of the domain layer, this crate has no
//! external dependencies; providers, parsing and orchestration live in the
//! crates built on top of it.
//!
//! ## Key Concepts
//!
//! - **CaseDetails**: structured summary of a case document, always fully populated
//! - **SimilarCase**: a model-suggested precedent (generated text, not an index hit)
//! - **Transcript**: the ordered chat turns of one session
//! - **AnalysisResult**: the strength-assessment narrative, flagged when it is a fallback
//! - **LlmProvider**: the single `generate(prompt) -> text` gateway

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case;
pub mod chat;
pub mod traits;

// Re-exports for convenience
pub use case::{AnalysisResult, CaseDetails, CaseType, SimilarCase};
pub use chat::{ChatTurn, Role, Transcript};
pub use traits::LlmProvider;
