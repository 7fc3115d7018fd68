//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-request session context.

use crate::adapters::{
    InMemorySessionStore, MockDocumentParser, MockLegalAiAdapter, MockPaymentAdapter,
};
use crate::config::Config;
use crate::error::ApiError;
use crate::web::page::PageRenderer;
use lexinary_core::ports::{
    CaseResearchService, ContractAnalysisService, DocumentParser, PaymentService, SessionHandle,
    SessionStore, SummarizationService,
};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Sessions)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<Config>,
    pub summarizer: Arc<dyn SummarizationService>,
    pub contract_analyzer: Arc<dyn ContractAnalysisService>,
    pub case_research: Arc<dyn CaseResearchService>,
    pub payments: Arc<dyn PaymentService>,
    pub parser: Arc<dyn DocumentParser>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    /// Wires every port to its mock adapter.
    pub fn with_mocks(config: Config) -> Result<Self, ApiError> {
        let ai = Arc::new(MockLegalAiAdapter::new(config.mock_latency));
        Ok(Self {
            sessions: Arc::new(InMemorySessionStore::new(config.session_idle_ttl)),
            config: Arc::new(config),
            summarizer: ai.clone(),
            contract_analyzer: ai.clone(),
            case_research: ai,
            payments: Arc::new(MockPaymentAdapter),
            parser: Arc::new(MockDocumentParser),
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}

//=========================================================================================
// CurrentSession (Specific to One Request)
//=========================================================================================

/// The visitor's session, resolved from the cookie by
/// [`crate::web::session::attach_session`] and handed to handlers as an extension.
#[derive(Clone)]
pub struct CurrentSession {
    /// Opaque store key carried in the session cookie.
    pub token: String,
    pub handle: SessionHandle,
}
