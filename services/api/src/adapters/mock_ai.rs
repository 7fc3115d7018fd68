//! services/api/src/adapters/mock_ai.rs
//!
//! This module contains the stand-in for the legal AI provider. It implements the
//! summarization, contract-analysis and case-research ports on top of the
//! deterministic functions in `lexinary_core::mock`, sleeping for a configured
//! interval first so the UI has something to show a spinner for.

use async_trait::async_trait;
use lexinary_core::domain::{CaseResult, ClauseFinding};
use lexinary_core::mock;
use lexinary_core::ports::{
    CaseResearchService, ContractAnalysisService, PortResult, SummarizationService,
};
use std::time::Duration;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone, Debug)]
pub struct MockLegalAiAdapter {
    latency: Duration,
}

impl MockLegalAiAdapter {
    /// Creates a new `MockLegalAiAdapter` that pauses for `latency` per call.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl SummarizationService for MockLegalAiAdapter {
    async fn summarize(&self, transcript: &str) -> PortResult<String> {
        self.simulate_latency().await;
        let summary = mock::summarize(transcript)?;
        debug!(chars = summary.len(), "Mock summary generated");
        Ok(summary)
    }
}

#[async_trait]
impl ContractAnalysisService for MockLegalAiAdapter {
    async fn analyze_contract(&self, contract_text: &str) -> PortResult<Vec<ClauseFinding>> {
        self.simulate_latency().await;
        Ok(mock::analyze_contract(contract_text))
    }
}

#[async_trait]
impl CaseResearchService for MockLegalAiAdapter {
    async fn search_cases(&self, query: &str) -> PortResult<Vec<CaseResult>> {
        self.simulate_latency().await;
        Ok(mock::search_cases(query)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexinary_core::ports::PortError;

    #[tokio::test]
    async fn blank_query_surfaces_as_invalid_input() {
        let adapter = MockLegalAiAdapter::new(Duration::ZERO);
        let err = adapter.search_cases("  ").await.unwrap_err();
        assert!(matches!(err, PortError::InvalidInput(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_simulated() {
        let adapter = MockLegalAiAdapter::new(Duration::from_secs(1));
        let started = tokio::time::Instant::now();
        let findings = adapter.analyze_contract("any text").await.unwrap();
        assert_eq!(findings.len(), 4);
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
