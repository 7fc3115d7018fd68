pub mod mock_ai;
pub mod parser;
pub mod payment;
pub mod session_store;

pub use mock_ai::MockLegalAiAdapter;
pub use parser::MockDocumentParser;
pub use payment::MockPaymentAdapter;
pub use session_store::InMemorySessionStore;
