//! Per-user session state
//!
//! Everything one user's analysis and conversation depends on lives in a
//! [`Session`]. Sessions are plain values: give every user their own, never
//! share one between users.

use crate::types::CaseAnalysis;
use legaledge_domain::{AnalysisResult, CaseDetails, SimilarCase, Transcript};

/// State of one user session
#[derive(Debug, Clone, Default)]
pub struct Session {
    case_details: CaseDetails,
    similar_cases: Vec<SimilarCase>,
    analysis: Option<AnalysisResult>,
    transcript: Transcript,
    analyzed: bool,
}

impl Session {
    /// Create a fresh, empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Details of the most recently analyzed case (defaults before any analysis)
    pub fn case_details(&self) -> &CaseDetails {
        &self.case_details
    }

    /// Similar cases from the most recent analysis
    pub fn similar_cases(&self) -> &[SimilarCase] {
        &self.similar_cases
    }

    /// Strength analysis from the most recent run, if any
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// The conversation so far
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True once an analysis run has completed
    pub fn is_analyzed(&self) -> bool {
        self.analyzed
    }

    /// Drop the whole conversation
    pub fn reset_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Overwrite the case state with a completed run
    pub(crate) fn record(&mut self, run: &CaseAnalysis) {
        self.case_details = run.case_details.clone();
        self.similar_cases = run.similar_cases.clone();
        self.analysis = Some(run.analysis.clone());
        self.analyzed = true;
    }

    /// Case details and transcript borrowed together for a chat turn
    pub(crate) fn chat_parts(&mut self) -> (&CaseDetails, &mut Transcript) {
        (&self.case_details, &mut self.transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legaledge_domain::ChatTurn;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(session.case_details().is_empty());
        assert!(session.similar_cases().is_empty());
        assert!(session.analysis().is_none());
        assert!(session.transcript().is_empty());
        assert!(!session.is_analyzed());
    }

    #[test]
    fn test_reset_transcript_keeps_case_state() {
        let mut session = Session::new();
        session.case_details.title = "X vs. Y".to_string();
        session.transcript.push(ChatTurn::user("hi"));

        session.reset_transcript();
        assert!(session.transcript().is_empty());
        assert_eq!(session.case_details().title, "X vs. Y");
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = Session::new();
        let second = first.clone();
        first.transcript.push(ChatTurn::user("only in first"));
        assert_eq!(first.transcript().len(), 1);
        assert!(second.transcript().is_empty());
    }
}
