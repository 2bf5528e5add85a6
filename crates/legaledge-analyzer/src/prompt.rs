//! LLM prompt templates for each pipeline stage and for chat

use crate::config::AnalyzerConfig;
use legaledge_domain::{CaseDetails, ChatTurn, SimilarCase};

/// Builds the prompts sent to the model
///
/// Rendering is deterministic: the same inputs always give the same prompt.
pub struct PromptBuilder<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder over a configuration
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Prompt asking for the case details as a single JSON object
    ///
    /// Only the first `max_document_chars` characters of `text` are embedded.
    pub fn extraction(&self, text: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str("Analyze the following legal case text and extract key information in JSON format:\n\n");
        prompt.push_str("---\n");
        prompt.push_str(truncate_chars(text, self.config.max_document_chars));
        prompt.push_str("\n---\n\n");
        prompt.push_str(EXTRACTION_FORMAT);

        prompt
    }

    /// Prompt asking for landmark precedents similar to the case
    pub fn similar_cases(&self, details: &CaseDetails) -> String {
        let mut prompt = String::new();

        prompt.push_str("Based on this case information:\n");
        prompt.push_str(&format!("- Case Type: {}\n", details.case_type));
        prompt.push_str(&format!("- Main Issues: {}\n", details.issues_joined()));
        prompt.push_str(&format!("- Statutes: {}\n", details.statutes_joined()));
        prompt.push_str(&format!("- Key Facts: {}\n\n", details.key_facts));

        prompt.push_str(&format!(
            "Please provide {} similar landmark {} legal cases with brief descriptions.\n",
            self.config.max_similar_cases, self.config.jurisdiction
        ));
        prompt.push_str(SIMILAR_CASES_FORMAT);
        prompt.push_str(&format!(
            "\nFocus on cases from the {}.\n",
            self.config.courts_focus
        ));

        prompt
    }

    /// Prompt asking for the eight-section strength assessment
    pub fn strength_analysis(&self, details: &CaseDetails, similar: &[SimilarCase]) -> String {
        let mut prompt = String::new();

        prompt.push_str("As a legal expert, analyze this case and provide detailed recommendations:\n\n");

        prompt.push_str("CASE DETAILS:\n");
        prompt.push_str(&format!("- Title: {}\n", details.title));
        prompt.push_str(&format!("- Court: {}\n", details.court));
        prompt.push_str(&format!("- Type: {}\n", details.case_type));
        prompt.push_str(&format!("- Issues: {}\n", details.issues_joined()));
        prompt.push_str(&format!("- Statutes: {}\n", details.statutes_joined()));
        prompt.push_str(&format!("- Facts: {}\n", details.key_facts));
        prompt.push_str(&format!("- Relief Sought: {}\n\n", details.relief_sought));

        prompt.push_str("SIMILAR CASES FOUND:\n");
        if similar.is_empty() {
            prompt.push_str("(none found)\n");
        }
        for case in similar {
            prompt.push_str(&format!("- {}: {}\n", case.title, case.description));
        }
        prompt.push('\n');

        prompt.push_str(&format!(
            "Please provide a comprehensive analysis in the following format within {} words:\n\n",
            self.config.analysis_target_words
        ));
        prompt.push_str(ANALYSIS_SECTIONS);

        prompt
    }

    /// Prompt answering `question` with the case and the recent conversation as context
    ///
    /// `history` is embedded whole; callers pass the window they want.
    pub fn chat(&self, details: &CaseDetails, history: &[ChatTurn], question: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str("You are a legal expert assistant. The user has uploaded a case with these details:\n");
        prompt.push_str(&format!("- Title: {}\n", details.title));
        prompt.push_str(&format!("- Court: {}\n", details.court));
        prompt.push_str(&format!("- Type: {}\n", details.case_type));
        prompt.push_str(&format!("- Issues: {}\n", details.issues_joined()));
        prompt.push_str(&format!("- Key Facts: {}\n\n", details.key_facts));

        prompt.push_str("Chat History:\n");
        if history.is_empty() {
            prompt.push_str("(no previous messages)\n");
        }
        for turn in history {
            prompt.push_str(&format!("{}: {}\n", turn.role, turn.content));
        }
        prompt.push('\n');

        prompt.push_str(&format!("Current Question: {}\n\n", question));
        prompt.push_str(&format!(
            "Please provide a helpful, accurate response based on {} legal principles in short.\n",
            self.config.jurisdiction
        ));
        prompt.push_str(CHAT_GUIDANCE);

        prompt
    }
}

/// The first `max_chars` characters of `text` (whole string if shorter)
///
/// Counts Unicode scalar values, so multi-byte characters are never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

const EXTRACTION_FORMAT: &str = r#"Please extract and return ONLY a JSON object with these fields:
{
    "case_title": "extracted case title",
    "court": "court name",
    "case_type": "criminal/civil/constitutional/administrative",
    "main_issues": ["list", "of", "main", "legal", "issues"],
    "statutes_involved": ["list", "of", "statutes", "sections"],
    "key_facts": "brief summary of key facts",
    "relief_sought": "what relief is being sought",
    "arguments_summary": "summary of main arguments"
}

Remember: Return ONLY the JSON object, no additional commentary."#;

const SIMILAR_CASES_FORMAT: &str = "Format your response as a list. Start each case on its own line with the case name written with \"v.\" between the parties (for example \"A v. B\"), followed by lines giving the court, year, and key principle.";

const ANALYSIS_SECTIONS: &str = r#"**CASE STRENGTH ASSESSMENT (1-10 scale):** [Your assessment with reasoning]

**CHANCES OF SUCCESS:** [Percentage estimate with detailed reasoning]

**STRENGTHS OF YOUR CASE:**
- [List 3-5 key strengths]

**WEAKNESSES TO ADDRESS:**
- [List 3-5 potential weaknesses]

**WHAT YOU CAN CHANGE/IMPROVE:**
- [Specific actionable recommendations]

**AREAS FOR FURTHER RESEARCH:**
- [Specific legal areas, statutes, or cases to research]

**RECOMMENDED ARGUMENTS:**
- [Key legal arguments to focus on]

**WHAT YOU SHOULD KNOW:**
- [Important legal principles and precedents]

**DISCLAIMER:** This is AI-generated analysis and should not replace professional legal advice."#;

const CHAT_GUIDANCE: &str = "Always include relevant case law or statutory references when possible in short.\nAdd appropriate disclaimers about seeking professional legal advice in short.\n";

#[cfg(test)]
mod tests {
    use super::*;
    use legaledge_domain::CaseType;

    fn sample_details() -> CaseDetails {
        CaseDetails {
            title: "X vs. Y".to_string(),
            court: "Supreme Court".to_string(),
            case_type: CaseType::Civil,
            main_issues: vec!["breach".to_string(), "damages".to_string()],
            statutes_involved: vec!["Contract Act s.73".to_string(), "s.74".to_string()],
            key_facts: "Goods were never delivered".to_string(),
            relief_sought: "compensation".to_string(),
            arguments_summary: "Time was of the essence".to_string(),
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
        // Multi-byte characters count once each
        assert_eq!(truncate_chars("§§§§", 2), "§§");
    }

    #[test]
    fn test_extraction_prompt_truncates_to_budget() {
        let config = AnalyzerConfig::default();
        let text = format!("{}TAIL_MARKER", "x".repeat(8_000));

        let prompt = PromptBuilder::new(&config).extraction(&text);
        assert!(prompt.contains(&"x".repeat(8_000)));
        assert!(!prompt.contains(&"x".repeat(8_001)));
        assert!(!prompt.contains("TAIL_MARKER"));
    }

    #[test]
    fn test_extraction_prompt_keeps_short_text_whole() {
        let config = AnalyzerConfig::default();
        let prompt = PromptBuilder::new(&config).extraction("Case: X vs. Y, Supreme Court");
        assert!(prompt.contains("Case: X vs. Y, Supreme Court"));
        for key in [
            "case_title",
            "court",
            "case_type",
            "main_issues",
            "statutes_involved",
            "key_facts",
            "relief_sought",
            "arguments_summary",
        ] {
            assert!(prompt.contains(key), "missing key {}", key);
        }
    }

    #[test]
    fn test_similar_cases_prompt_embeds_joined_fields() {
        let config = AnalyzerConfig::default();
        let prompt = PromptBuilder::new(&config).similar_cases(&sample_details());
        assert!(prompt.contains("- Case Type: civil"));
        assert!(prompt.contains("- Main Issues: breach, damages"));
        assert!(prompt.contains("- Statutes: Contract Act s.73, s.74"));
        assert!(prompt.contains("- Key Facts: Goods were never delivered"));
        assert!(prompt.contains("provide 5 similar landmark Indian legal cases"));
        assert!(prompt.contains("v."));
    }

    #[test]
    fn test_strength_prompt_lists_similar_cases() {
        let config = AnalyzerConfig::default();
        let similar = vec![
            SimilarCase::new("Hadley v. Baxendale", "foreseeability of loss"),
            SimilarCase::new("A vs. B", ""),
        ];
        let prompt = PromptBuilder::new(&config).strength_analysis(&sample_details(), &similar);
        assert!(prompt.contains("- Title: X vs. Y"));
        assert!(prompt.contains("- Relief Sought: compensation"));
        assert!(prompt.contains("- Hadley v. Baxendale: foreseeability of loss\n"));
        assert!(prompt.contains("- A vs. B: \n"));
        assert!(prompt.contains("within 500 words"));
        assert!(prompt.contains("CASE STRENGTH ASSESSMENT (1-10 scale)"));
        assert!(prompt.contains("DISCLAIMER"));
    }

    #[test]
    fn test_strength_prompt_without_similar_cases() {
        let config = AnalyzerConfig::default();
        let prompt = PromptBuilder::new(&config).strength_analysis(&CaseDetails::default(), &[]);
        assert!(prompt.contains("(none found)"));
        assert!(prompt.contains("- Type: unknown"));
    }

    #[test]
    fn test_chat_prompt_renders_history_in_order() {
        let config = AnalyzerConfig::default();
        let history = vec![
            ChatTurn::user("Is delay a breach?"),
            ChatTurn::assistant("Often, yes."),
        ];
        let prompt = PromptBuilder::new(&config).chat(&sample_details(), &history, "What next?");
        let user_at = prompt.find("user: Is delay a breach?").unwrap();
        let assistant_at = prompt.find("assistant: Often, yes.").unwrap();
        assert!(user_at < assistant_at);
        assert!(prompt.contains("Current Question: What next?"));
        assert!(prompt.contains("- Issues: breach, damages"));
        assert!(!prompt.contains("(no previous messages)"));
    }

    #[test]
    fn test_chat_prompt_marks_empty_history() {
        let config = AnalyzerConfig::default();
        let prompt = PromptBuilder::new(&config).chat(&CaseDetails::default(), &[], "Hello?");
        assert!(prompt.contains("(no previous messages)"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let config = AnalyzerConfig::default();
        let builder = PromptBuilder::new(&config);
        let details = sample_details();
        assert_eq!(builder.similar_cases(&details), builder.similar_cases(&details));
        assert_eq!(builder.extraction("same"), builder.extraction("same"));
    }
}
