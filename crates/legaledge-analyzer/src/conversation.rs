//! Follow-up conversation about an analyzed case

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::prompt::PromptBuilder;
use crate::session::Session;
use crate::types::{ChatReply, QuickQuestion};
use legaledge_domain::{CaseDetails, ChatTurn, LlmProvider, Transcript};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Answers questions about a case, keeping the transcript up to date
///
/// Each answered question appends exactly two turns: the user's question and
/// the assistant's reply (a generated answer or an apology).
pub struct ConversationManager<L> {
    llm: Arc<L>,
    config: AnalyzerConfig,
}

impl<L> ConversationManager<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new conversation manager that owns its provider
    ///
    /// Fails with [`AnalyzerError::Config`] if `config` does not validate.
    pub fn new(llm: L, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        Self::with_shared(Arc::new(llm), config)
    }

    /// Create a new conversation manager on a shared provider
    pub fn with_shared(llm: Arc<L>, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        Ok(Self { llm, config })
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Answer `question` about the case described by `details`
    ///
    /// The question is appended first, so the prompt's history is the last
    /// `chat_window` turns ending with it. A blank question is ignored: `None` is returned, nothing is appended
    /// and the model is not called.
    pub fn ask(
        &self,
        question: &str,
        details: &CaseDetails,
        transcript: &mut Transcript,
    ) -> Option<ChatReply> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        Some(self.answer(question, details, transcript))
    }

    /// Answer `question` using the case and transcript held by `session`
    pub fn ask_session(&self, session: &mut Session, question: &str) -> Option<ChatReply> {
        let (details, transcript) = session.chat_parts();
        self.ask(question, details, transcript)
    }

    /// Ask one of the canned follow-up questions
    pub fn ask_quick(&self, session: &mut Session, question: QuickQuestion) -> ChatReply {
        let (details, transcript) = session.chat_parts();
        self.answer(question.text(), details, transcript)
    }

    /// Empty the session's transcript
    pub fn reset_transcript(&self, session: &mut Session) {
        session.reset_transcript();
    }

    fn answer(&self, question: &str, details: &CaseDetails, transcript: &mut Transcript) -> ChatReply {
        // The window ends with the question just asked
        transcript.push(ChatTurn::user(question));

        let prompt = PromptBuilder::new(&self.config).chat(
            details,
            transcript.window(self.config.chat_window),
            question,
        );
        debug!("Chat prompt length: {} chars", prompt.len());

        let reply = match self.llm.generate(&prompt) {
            Ok(text) => ChatReply {
                text,
                was_fallback: false,
            },
            Err(e) => {
                warn!("Chat generation failed: {}", e);
                ChatReply {
                    text: apology(&e),
                    was_fallback: true,
                }
            }
        };

        transcript.push(ChatTurn::assistant(reply.text.clone()));
        reply
    }
}

fn apology(error: &impl Display) -> String {
    format!(
        "I apologize, but I encountered an error: {}. Please try rephrasing your question.",
        error
    )
}
