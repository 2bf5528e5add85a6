//! Case analysis orchestration
//!
//! One run walks `Idle → TextExtracted → DetailsExtracted → SimilarCasesFound
//! → AnalysisComplete`. Only a document without text stops a run early; every
//! model failure is replaced with a fallback at the stage where it happens.

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::{parse_case_details, parse_similar_cases};
use crate::pdf::{join_pages, PdfTextExtractor};
use crate::prompt::PromptBuilder;
use crate::session::Session;
use crate::types::{AnalysisMetadata, AnalysisStage, CaseAnalysis};
use legaledge_domain::{AnalysisResult, CaseDetails, LlmProvider, SimilarCase};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Text shown in place of the strength analysis when the model call fails
pub const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";

/// Runs the case-analysis pipeline against a model
pub struct CaseAnalyzer<L> {
    llm: Arc<L>,
    extractor: PdfTextExtractor,
    config: AnalyzerConfig,
}

impl<L> CaseAnalyzer<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new analyzer that owns its provider
    ///
    /// Fails with [`AnalyzerError::Config`] if `config` does not validate.
    pub fn new(llm: L, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        Self::with_shared(Arc::new(llm), config)
    }

    /// Create a new analyzer on a provider shared with other components
    pub fn with_shared(llm: Arc<L>, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        Ok(Self {
            llm,
            extractor: PdfTextExtractor::new(),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a PDF document and store the result in `session`
    pub fn analyze(
        &self,
        session: &mut Session,
        document: &[u8],
    ) -> Result<CaseAnalysis, AnalyzerError> {
        self.analyze_with_progress(session, document, |_| {})
    }

    /// Like [`CaseAnalyzer::analyze`], reporting each stage as it is reached
    pub fn analyze_with_progress<F>(
        &self,
        session: &mut Session,
        document: &[u8],
        mut on_stage: F,
    ) -> Result<CaseAnalysis, AnalyzerError>
    where
        F: FnMut(AnalysisStage),
    {
        on_stage(AnalysisStage::Idle);
        let pages = self.extractor.extract_pages(document)?;
        let text = join_pages(&pages);
        self.run(session, &text, pages.len(), on_stage)
    }

    /// Analyze already-extracted document text and store the result in `session`
    pub fn analyze_text(
        &self,
        session: &mut Session,
        text: &str,
    ) -> Result<CaseAnalysis, AnalyzerError> {
        self.analyze_text_with_progress(session, text, |_| {})
    }

    /// Like [`CaseAnalyzer::analyze_text`], reporting each stage as it is reached
    pub fn analyze_text_with_progress<F>(
        &self,
        session: &mut Session,
        text: &str,
        mut on_stage: F,
    ) -> Result<CaseAnalysis, AnalyzerError>
    where
        F: FnMut(AnalysisStage),
    {
        on_stage(AnalysisStage::Idle);
        self.run(session, text, 0, on_stage)
    }

    fn run<F>(
        &self,
        session: &mut Session,
        text: &str,
        page_count: usize,
        mut on_stage: F,
    ) -> Result<CaseAnalysis, AnalyzerError>
    where
        F: FnMut(AnalysisStage),
    {
        let start_time = Instant::now();

        if text.trim().is_empty() {
            warn!("Document yielded no text, stopping analysis");
            return Err(AnalyzerError::EmptyDocument);
        }

        let document_chars = text.chars().count();
        let truncated = document_chars > self.config.max_document_chars;
        info!(
            "Starting case analysis: {} pages, {} chars{}",
            page_count,
            document_chars,
            if truncated { " (truncated)" } else { "" }
        );
        on_stage(AnalysisStage::TextExtracted);

        let (case_details, details_fallback) = self.extract_details(text);
        on_stage(AnalysisStage::DetailsExtracted);

        let (similar_cases, similar_cases_fallback) = self.find_similar_cases(&case_details);
        on_stage(AnalysisStage::SimilarCasesFound);

        let analysis = self.assess_strength(&case_details, &similar_cases);
        on_stage(AnalysisStage::AnalysisComplete);

        let run = CaseAnalysis {
            case_details,
            similar_cases,
            analysis,
            details_fallback,
            similar_cases_fallback,
            stage: AnalysisStage::AnalysisComplete,
            metadata: AnalysisMetadata {
                page_count,
                document_chars,
                truncated,
                processing_time_ms: start_time.elapsed().as_millis() as u64,
            },
        };

        info!(
            "Case analysis complete: type '{}', {} similar cases, fallback used: {}",
            run.case_details.case_type,
            run.similar_cases.len(),
            run.used_fallback()
        );

        session.record(&run);
        Ok(run)
    }

    fn extract_details(&self, text: &str) -> (CaseDetails, bool) {
        let prompt = self.prompts().extraction(text);
        debug!("Extraction prompt length: {} chars", prompt.len());

        match self.llm.generate(&prompt) {
            Ok(response) => {
                let parsed = parse_case_details(&response);
                (parsed.details, parsed.was_fallback)
            }
            Err(e) => {
                warn!("Case detail extraction failed, using defaults: {}", e);
                (CaseDetails::default(), true)
            }
        }
    }

    fn find_similar_cases(&self, details: &CaseDetails) -> (Vec<SimilarCase>, bool) {
        let prompt = self.prompts().similar_cases(details);

        match self.llm.generate(&prompt) {
            Ok(response) => (
                parse_similar_cases(&response, self.config.max_similar_cases),
                false,
            ),
            Err(e) => {
                warn!("Similar case search failed, continuing without: {}", e);
                (Vec::new(), true)
            }
        }
    }

    fn assess_strength(&self, details: &CaseDetails, similar: &[SimilarCase]) -> AnalysisResult {
        let prompt = self.prompts().strength_analysis(details, similar);

        match self.llm.generate(&prompt) {
            Ok(text) => AnalysisResult::generated(text),
            Err(e) => {
                warn!("Strength analysis failed: {}", e);
                AnalysisResult::fallback(ANALYSIS_FAILED)
            }
        }
    }

    fn prompts(&self) -> PromptBuilder<'_> {
        PromptBuilder::new(&self.config)
    }
}
