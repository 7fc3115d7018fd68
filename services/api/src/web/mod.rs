pub mod page;
pub mod rest;
pub mod session;
pub mod state;

pub use page::index_handler;
pub use rest::{
    analyze_contract_handler, download_contract_handler, download_summary_handler,
    end_session_handler, research_handler, session_handler, subscribe_handler,
    summarize_handler,
};
pub use session::attach_session;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Slack above the upload limit so an oversized file still reaches validation
/// and gets a readable error instead of a bare 413.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Request body cap for a given upload limit.
pub fn body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(BODY_LIMIT_SLACK)
}

/// Builds the application router. Every route runs inside a visitor session.
pub fn router(app_state: Arc<AppState>) -> Router {
    let body_limit = body_limit(app_state.config.max_upload_bytes);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/session", get(session_handler).delete(end_session_handler))
        .route("/api/summaries", post(summarize_handler))
        .route("/api/summaries/download", get(download_summary_handler))
        .route("/api/contracts", post(analyze_contract_handler))
        .route("/api/contracts/download", get(download_contract_handler))
        .route("/api/research", post(research_handler))
        .route("/api/subscribe", post(subscribe_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            attach_session,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
