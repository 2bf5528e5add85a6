//! Case module - the structured view of one legal case document

use std::fmt;

/// Broad classification of a case
///
/// `Unknown` is the safe default used whenever the model's answer cannot be
/// matched to one of the known kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseType {
    /// Criminal proceedings
    Criminal,

    /// Civil disputes
    Civil,

    /// Constitutional matters
    Constitutional,

    /// Administrative law
    Administrative,

    /// Not determined
    #[default]
    Unknown,
}

impl CaseType {
    /// Get the case type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::Criminal => "criminal",
            CaseType::Civil => "civil",
            CaseType::Constitutional => "constitutional",
            CaseType::Administrative => "administrative",
            CaseType::Unknown => "unknown",
        }
    }

    /// Parse a case type leniently
    ///
    /// Matching ignores case and surrounding whitespace. Anything that is not
    /// one of the four known kinds maps to `Unknown`.
    ///
    /// # Examples
    ///
    /// ```
    /// use legaledge_domain::CaseType;
    ///
    /// assert_eq!(CaseType::parse(" Civil "), CaseType::Civil);
    /// assert_eq!(CaseType::parse("criminal/civil"), CaseType::Unknown);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "criminal" => CaseType::Criminal,
            "civil" => CaseType::Civil,
            "constitutional" => CaseType::Constitutional,
            "administrative" => CaseType::Administrative,
            _ => CaseType::Unknown,
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured metadata extracted from a case document
///
/// Every field is always present. `CaseDetails::default()` (empty strings,
/// empty lists, `CaseType::Unknown`) is the record consumers see when
/// extraction fails, so nothing downstream branches on missing data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseDetails {
    /// Case title, e.g. "X vs. Y"
    pub title: String,

    /// Court hearing the case
    pub court: String,

    /// Broad classification
    pub case_type: CaseType,

    /// Main legal issues, in the order the model listed them
    pub main_issues: Vec<String>,

    /// Statutes and sections involved
    pub statutes_involved: Vec<String>,

    /// Brief summary of the key facts
    pub key_facts: String,

    /// Relief being sought
    pub relief_sought: String,

    /// Summary of the main arguments
    pub arguments_summary: String,
}

impl CaseDetails {
    /// Main issues joined for embedding in natural-language prompts
    pub fn issues_joined(&self) -> String {
        self.main_issues.join(", ")
    }

    /// Statutes joined for embedding in natural-language prompts
    pub fn statutes_joined(&self) -> String {
        self.statutes_involved.join(", ")
    }

    /// True if this record carries no extracted information
    pub fn is_empty(&self) -> bool {
        *self == CaseDetails::default()
    }
}

/// A precedent suggested by the model
///
/// Generated text, not retrieved from any index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarCase {
    /// The line that named the case (contains a `v.`/`vs.` separator)
    pub title: String,

    /// Text that followed the title, space-joined
    pub description: String,
}

impl SimilarCase {
    /// Create a new similar case entry
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// The strength-assessment narrative for a case
///
/// The text is opaque and displayed verbatim. `was_fallback` is set when the
/// model call failed and `text` is the fixed failure notice instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Narrative text
    pub text: String,

    /// True when `text` is a substituted failure notice
    pub was_fallback: bool,
}

impl AnalysisResult {
    /// Wrap text produced by the model
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            was_fallback: false,
        }
    }

    /// Wrap a substituted failure notice
    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            was_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_case_details_is_fully_populated() {
        let details = CaseDetails::default();
        assert_eq!(details.title, "");
        assert_eq!(details.court, "");
        assert_eq!(details.case_type, CaseType::Unknown);
        assert!(details.main_issues.is_empty());
        assert!(details.statutes_involved.is_empty());
        assert!(details.is_empty());
    }

    #[test]
    fn test_case_type_parsing() {
        assert_eq!(CaseType::parse("criminal"), CaseType::Criminal);
        assert_eq!(CaseType::parse("CIVIL"), CaseType::Civil);
        assert_eq!(CaseType::parse("Constitutional"), CaseType::Constitutional);
        assert_eq!(CaseType::parse("administrative\n"), CaseType::Administrative);
        assert_eq!(CaseType::parse(""), CaseType::Unknown);
        assert_eq!(CaseType::parse("tax"), CaseType::Unknown);
    }

    #[test]
    fn test_case_type_display_round_trips() {
        for kind in [
            CaseType::Criminal,
            CaseType::Civil,
            CaseType::Constitutional,
            CaseType::Administrative,
            CaseType::Unknown,
        ] {
            assert_eq!(CaseType::parse(&kind.to_string()), kind);
        }
    }

    #[test]
    fn test_joined_lists_preserve_order() {
        let details = CaseDetails {
            main_issues: vec!["breach".into(), "damages".into()],
            statutes_involved: vec!["Contract Act s.73".into()],
            ..CaseDetails::default()
        };
        assert_eq!(details.issues_joined(), "breach, damages");
        assert_eq!(details.statutes_joined(), "Contract Act s.73");
        assert!(!details.is_empty());
    }

    #[test]
    fn test_analysis_result_flags() {
        assert!(!AnalysisResult::generated("ok").was_fallback);
        assert!(AnalysisResult::fallback("failed").was_fallback);
    }
}
