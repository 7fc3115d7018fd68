pub mod domain;
pub mod mock;
pub mod ports;
pub mod quota;
pub mod session;
pub mod validation;

pub use domain::{CaseResult, Clause, ClauseFinding, DocumentType, Feature, RiskLevel, Subscription};
pub use ports::{
    CaseResearchService, ContractAnalysisService, DocumentParser, PaymentService, PortError,
    PortResult, SessionHandle, SessionStore, SummarizationService,
};
pub use quota::{can_run, FREE_SUMMARY_LIMIT};
pub use session::{Analytics, Session};
pub use validation::ValidationError;
