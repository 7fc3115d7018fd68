//! crates/lexinary_core/src/domain.rs
//!
//! Defines the pure, core data structures produced by the mock legal services.
//! These structs are independent of any transport or serialization format.

use std::fmt;

/// The fixed set of contract clauses the analyzer reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Liability,
    Termination,
    Payment,
    Confidentiality,
}

impl Clause {
    /// Every clause, in the order findings are reported.
    pub const ALL: [Clause; 4] = [
        Clause::Liability,
        Clause::Termination,
        Clause::Payment,
        Clause::Confidentiality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Clause::Liability => "Liability",
            Clause::Termination => "Termination",
            Clause::Payment => "Payment",
            Clause::Confidentiality => "Confidentiality",
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a contract analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseFinding {
    pub clause: Clause,
    pub risk: RiskLevel,
    pub score: f64,
    pub suggestion: String,
}

/// A single case returned by case research.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub case: String,
    pub summary: String,
    /// Between 0.0 and 1.0.
    pub relevance: f64,
}

/// The record returned by the payment collaborator on subscribe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub status: String,
    pub plan: String,
    pub cost: String,
}

/// Features a session can use; only summaries are metered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Summary,
    ContractAnalysis,
    CaseResearch,
}

/// Upload formats the transcript summarizer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Docx,
}

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl DocumentType {
    /// Resolves the type from a declared MIME type, falling back to the file extension.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let from_mime = content_type.and_then(|ct| {
            let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            match essence.as_str() {
                "application/pdf" => Some(DocumentType::Pdf),
                DOCX_MIME => Some(DocumentType::Docx),
                _ => None,
            }
        });

        from_mime.or_else(|| {
            let ext = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
            match ext.as_str() {
                "pdf" => Some(DocumentType::Pdf),
                "docx" => Some(DocumentType::Docx),
                _ => None,
            }
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Docx => "docx",
        }
    }
}
