//! Request and response types for analysis and chat

use legaledge_domain::{AnalysisResult, CaseDetails, SimilarCase};

/// Progress of one analysis run
///
/// Runs move strictly forward; a failed extraction ends the run at
/// `Idle`/`TextExtracted` and a new run starts from `Idle` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnalysisStage {
    /// Nothing done yet
    Idle,
    /// Document text is available
    TextExtracted,
    /// Case details have been extracted (or defaulted)
    DetailsExtracted,
    /// Similar cases have been collected (possibly none)
    SimilarCasesFound,
    /// Strength analysis is available (possibly a failure notice)
    AnalysisComplete,
}

impl AnalysisStage {
    /// Description of the work that follows this stage, for progress display
    pub fn next_action(&self) -> Option<&'static str> {
        match self {
            AnalysisStage::Idle => Some("Extracting text from PDF..."),
            AnalysisStage::TextExtracted => Some("Analyzing case details..."),
            AnalysisStage::DetailsExtracted => Some("Searching for similar cases..."),
            AnalysisStage::SimilarCasesFound => {
                Some("Analyzing case strength and generating recommendations...")
            }
            AnalysisStage::AnalysisComplete => None,
        }
    }
}

/// Output of a completed analysis run
#[derive(Debug, Clone)]
pub struct CaseAnalysis {
    /// Extracted case details (defaults when extraction failed)
    pub case_details: CaseDetails,

    /// Model-suggested precedents, at most the configured cap
    pub similar_cases: Vec<SimilarCase>,

    /// Strength assessment
    pub analysis: AnalysisResult,

    /// True when `case_details` is the default record rather than model output
    pub details_fallback: bool,

    /// True when the similar-case call failed and the list is a substituted empty list
    pub similar_cases_fallback: bool,

    /// Last stage reached
    pub stage: AnalysisStage,

    /// Metadata about the run
    pub metadata: AnalysisMetadata,
}

impl CaseAnalysis {
    /// True if any stage substituted a fallback
    pub fn used_fallback(&self) -> bool {
        self.details_fallback || self.similar_cases_fallback || self.analysis.was_fallback
    }
}

/// Metadata about an analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisMetadata {
    /// Pages in the source document (0 when the run started from text)
    pub page_count: usize,

    /// Characters of extracted text
    pub document_chars: usize,

    /// True if the text was cut to fit the extraction prompt
    pub truncated: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Assistant answer to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Reply text, as appended to the transcript
    pub text: String,

    /// True when the model call failed and `text` is an apology
    pub was_fallback: bool,
}

/// Canned follow-up questions offered after an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickQuestion {
    /// Chances of winning
    Chances,
    /// Arguments to focus on
    Arguments,
    /// Areas to research
    Research,
}

impl QuickQuestion {
    /// All quick questions, in display order
    pub const ALL: [QuickQuestion; 3] = [
        QuickQuestion::Chances,
        QuickQuestion::Arguments,
        QuickQuestion::Research,
    ];

    /// The question text sent to the model
    pub fn text(&self) -> &'static str {
        match self {
            QuickQuestion::Chances => "What are my chances of winning this case?",
            QuickQuestion::Arguments => "What are the key arguments I should focus on?",
            QuickQuestion::Research => "What areas should I research further?",
        }
    }

    /// Short keyword used to pick the question
    pub fn keyword(&self) -> &'static str {
        match self {
            QuickQuestion::Chances => "chances",
            QuickQuestion::Arguments => "arguments",
            QuickQuestion::Research => "research",
        }
    }

    /// Parse a keyword
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chances" => Some(QuickQuestion::Chances),
            "arguments" => Some(QuickQuestion::Arguments),
            "research" => Some(QuickQuestion::Research),
            _ => None,
        }
    }
}
