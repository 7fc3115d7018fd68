//! crates/lexinary_core/src/mock.rs
//!
//! Deterministic stand-ins for the AI and payment integrations. Nothing here
//! performs I/O; every output is a pure function of the input.

use crate::domain::{CaseResult, Clause, ClauseFinding, RiskLevel, Subscription};
use crate::ports::PortError;

/// Appended to every generated summary.
pub const TRUNCATION_MARKER: &str = "[...] (Summary truncated)";

const MIN_SUMMARY_WORDS: usize = 50;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("Transcript contains no text to summarize")]
    EmptyInput,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResearchError {
    #[error("Empty query, please enter a valid search term")]
    EmptyQuery,
}

impl From<SummarizeError> for PortError {
    fn from(e: SummarizeError) -> Self {
        PortError::InvalidInput(e.to_string())
    }
}

impl From<ResearchError> for PortError {
    fn from(e: ResearchError) -> Self {
        PortError::InvalidInput(e.to_string())
    }
}

/// Keeps the leading `max(50, n / 10)` words and appends [`TRUNCATION_MARKER`].
pub fn summarize(text: &str) -> Result<String, SummarizeError> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Err(SummarizeError::EmptyInput);
    }
    let keep = MIN_SUMMARY_WORDS.max(words.len() / 10);
    let head = words[..keep.min(words.len())].join(" ");
    Ok(format!("{head} {TRUNCATION_MARKER}"))
}

/// Returns the same four findings for any contract text.
pub fn analyze_contract(_contract_text: &str) -> Vec<ClauseFinding> {
    Clause::ALL
        .iter()
        .map(|&clause| {
            let (risk, score, suggestion) = match clause {
                Clause::Liability | Clause::Confidentiality => {
                    (RiskLevel::High, 0.9, "Limit exposure to $100K")
                }
                Clause::Termination | Clause::Payment => (RiskLevel::Low, 0.5, "Standard clause"),
            };
            ClauseFinding {
                clause,
                risk,
                score,
                suggestion: suggestion.to_string(),
            }
        })
        .collect()
}

/// Echoes the first comma-separated term of the query into two canned cases.
pub fn search_cases(query: &str) -> Result<Vec<CaseResult>, ResearchError> {
    if query.trim().is_empty() {
        return Err(ResearchError::EmptyQuery);
    }
    let lowered = query.to_lowercase();
    let term = lowered.split(',').next().unwrap_or_default().trim();

    Ok(vec![
        CaseResult {
            case: "Smith v. Jones, 2023".to_string(),
            summary: format!("{term} upheld due to breach"),
            relevance: 0.85,
        },
        CaseResult {
            case: "Doe v. Roe, 2022".to_string(),
            summary: format!("{term} dismissed"),
            relevance: 0.75,
        },
    ])
}

/// Never fails and never charges anything.
pub fn subscribe(_user_id: &str) -> Subscription {
    Subscription {
        status: "active".to_string(),
        plan: "unlimited".to_string(),
        cost: "$99/month".to_string(),
    }
}
