//! Analyzer and conversation manager sharing one provider

use crate::analyzer::CaseAnalyzer;
use crate::config::AnalyzerConfig;
use crate::conversation::ConversationManager;
use crate::error::AnalyzerError;
use crate::session::Session;
use crate::types::{AnalysisStage, CaseAnalysis, ChatReply, QuickQuestion};
use legaledge_domain::LlmProvider;
use std::fmt::Display;
use std::sync::Arc;

/// Front door for one provider: analyze documents, then talk about them
///
/// Holds no session state, so one assistant can serve any number of
/// [`Session`]s.
pub struct LegalAssistant<L> {
    analyzer: CaseAnalyzer<L>,
    conversation: ConversationManager<L>,
}

impl<L> LegalAssistant<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create an assistant over a provider
    ///
    /// Fails with [`AnalyzerError::Config`] if `config` does not validate.
    pub fn new(llm: L, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let llm = Arc::new(llm);
        Ok(Self {
            analyzer: CaseAnalyzer::with_shared(Arc::clone(&llm), config.clone())?,
            conversation: ConversationManager::with_shared(llm, config)?,
        })
    }

    /// The document pipeline
    pub fn analyzer(&self) -> &CaseAnalyzer<L> {
        &self.analyzer
    }

    /// The chat side
    pub fn conversation(&self) -> &ConversationManager<L> {
        &self.conversation
    }

    /// See [`CaseAnalyzer::analyze_with_progress`]
    pub fn analyze<F>(
        &self,
        session: &mut Session,
        document: &[u8],
        on_stage: F,
    ) -> Result<CaseAnalysis, AnalyzerError>
    where
        F: FnMut(AnalysisStage),
    {
        self.analyzer.analyze_with_progress(session, document, on_stage)
    }

    /// See [`ConversationManager::ask_session`]
    pub fn ask(&self, session: &mut Session, question: &str) -> Option<ChatReply> {
        self.conversation.ask_session(session, question)
    }

    /// See [`ConversationManager::ask_quick`]
    pub fn ask_quick(&self, session: &mut Session, question: QuickQuestion) -> ChatReply {
        self.conversation.ask_quick(session, question)
    }
}
