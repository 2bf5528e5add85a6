//! Best-effort parsing of model output
//!
//! The model is an opaque text oracle, so nothing here fails: unusable output
//! degrades to the default record or an empty list. These heuristics stay in
//! this module; the rest of the crate only sees the typed results.

use legaledge_domain::{CaseDetails, CaseType, SimilarCase};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// First `{` to last `}`, across lines
static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid")
});

/// `v.` or `vs.` as a case-name separator
static CASE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vs?\.").expect("case separator pattern is valid"));

/// Case details recovered from a model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDetails {
    /// The recovered record; always fully populated
    pub details: CaseDetails,

    /// True when no JSON object could be recovered and `details` is the default
    pub was_fallback: bool,
}

/// Parse case details from a model response
///
/// Finds the outermost brace-delimited span, parses it as JSON, and maps the
/// known keys onto [`CaseDetails`]. Missing or mistyped keys keep their
/// defaults. If no object can be recovered the default record is returned.
pub fn parse_case_details(response: &str) -> ParsedDetails {
    let Some(candidate) = JSON_OBJECT.find(response) else {
        warn!("No JSON object found in case details response");
        return fallback_details();
    };

    match serde_json::from_str::<Value>(candidate.as_str()) {
        Ok(Value::Object(obj)) => ParsedDetails {
            details: details_from_object(&obj),
            was_fallback: false,
        },
        Ok(other) => {
            warn!("Case details JSON is not an object: {}", json_kind(&other));
            fallback_details()
        }
        Err(e) => {
            warn!("Failed to parse case details JSON: {}", e);
            fallback_details()
        }
    }
}

/// Parse a list of similar cases from a model response
///
/// A trimmed line containing `v.` or `vs.` (any case) starts a new entry and
/// becomes its title. Following lines are space-joined into the description
/// until the next title. Lines before the first title are ignored. At most
/// `cap` entries are returned, in the order they appear.
pub fn parse_similar_cases(response: &str, cap: usize) -> Vec<SimilarCase> {
    let mut cases: Vec<SimilarCase> = Vec::new();
    let mut description: Vec<&str> = Vec::new();

    for line in response.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if CASE_SEPARATOR.is_match(line) {
            if let Some(last) = cases.last_mut() {
                last.description = description.join(" ");
            }
            if cases.len() == cap {
                description.clear();
                break;
            }
            description.clear();
            cases.push(SimilarCase::new(line, ""));
        } else if !cases.is_empty() {
            description.push(line);
        }
    }

    if let Some(last) = cases.last_mut() {
        if !description.is_empty() {
            last.description = description.join(" ");
        }
    }

    debug!("Parsed {} similar cases", cases.len());
    cases
}

fn fallback_details() -> ParsedDetails {
    ParsedDetails {
        details: CaseDetails::default(),
        was_fallback: true,
    }
}

fn details_from_object(obj: &Map<String, Value>) -> CaseDetails {
    CaseDetails {
        title: string_field(obj, "case_title"),
        court: string_field(obj, "court"),
        case_type: CaseType::parse(&string_field(obj, "case_type")),
        main_issues: list_field(obj, "main_issues"),
        statutes_involved: list_field(obj, "statutes_involved"),
        key_facts: string_field(obj, "key_facts"),
        relief_sought: string_field(obj, "relief_sought"),
        arguments_summary: string_field(obj, "arguments_summary"),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).and_then(scalar_text).unwrap_or_default()
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_text)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(value) => scalar_text(value)
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
        None => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
