//! crates/lexinary_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! Each trait marks a place where a real integration (model provider, payment
//! processor, document parser) would attach; the service ships mock adapters.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{CaseResult, ClauseFinding, DocumentType, Subscription};
use crate::session::Session;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// Shared handle to one visitor's session. Only that visitor's requests lock it.
pub type SessionHandle = Arc<Mutex<Session>>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up an existing session without creating one.
    async fn get(&self, session_ref: &str) -> Option<SessionHandle>;

    /// Returns the session for `session_ref`, allocating a fresh one on first access.
    async fn get_or_create(&self, session_ref: &str) -> PortResult<SessionHandle>;

    /// Discards a session; the next access under the same reference starts over.
    async fn end(&self, session_ref: &str) -> PortResult<()>;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
pub trait SummarizationService: Send + Sync {
    /// Produces a summary of a deposition transcript.
    async fn summarize(&self, transcript: &str) -> PortResult<String>;
}

#[async_trait]
pub trait ContractAnalysisService: Send + Sync {
    async fn analyze_contract(&self, contract_text: &str) -> PortResult<Vec<ClauseFinding>>;
}

#[async_trait]
pub trait CaseResearchService: Send + Sync {
    /// Finds cases relevant to a free-text query. Blank queries are `InvalidInput`.
    async fn search_cases(&self, query: &str) -> PortResult<Vec<CaseResult>>;
}

#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn subscribe(&self, user_id: &str) -> PortResult<Subscription>;
}

#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Extracts plain text from an uploaded document of the given type.
    async fn extract_text(&self, file_bytes: &[u8], kind: DocumentType) -> PortResult<String>;
}
