//! services/api/src/web/page.rs
//!
//! Renders the single-page UI. The template is compiled into the binary and
//! filled in from the visitor's session snapshot on every load.

use crate::web::rest::SessionResponse;
use crate::web::state::{AppState, CurrentSession};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Html,
};
use chrono::Utc;
use minijinja::{context, Environment};
use std::sync::Arc;
use tracing::error;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(
        &self,
        session: &SessionResponse,
        max_upload_bytes: usize,
        max_contract_words: usize,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {
            session => session,
            max_upload_bytes => max_upload_bytes,
            max_upload_mib => max_upload_bytes / (1024 * 1024),
            max_contract_words => max_contract_words,
            version => env!("CARGO_PKG_VERSION"),
        })
    }
}

/// GET / - the demo page
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Html<String>, (StatusCode, String)> {
    let snapshot = {
        let mut session = current.handle.lock().await;
        session.refresh_time_spent(Utc::now());
        SessionResponse::from(&*session)
    };

    state
        .pages
        .render_index(
            &snapshot,
            state.config.max_upload_bytes,
            state.config.max_contract_words,
        )
        .map(Html)
        .map_err(|e| {
            error!("Failed to render page: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render page".to_string(),
            )
        })
}
