//! services/api/src/web/session.rs
//!
//! Session middleware. Every request is bound to a visitor session identified by
//! an opaque cookie token; visitors without a known token get a fresh session.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::web::state::{AppState, CurrentSession};

pub const SESSION_COOKIE: &str = "lexinary_session";

/// Resolves (or allocates) the visitor's session and inserts it into request
/// extensions. A newly allocated session is announced with a `Set-Cookie` header.
pub async fn attach_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Reuse the session named by the cookie, if the store still has it
    let existing = match session_token(req.headers()).map(str::to_owned) {
        Some(token) => state
            .sessions
            .get(&token)
            .await
            .map(|handle| (token, handle)),
        None => None,
    };

    // 2. Otherwise issue a new token and allocate
    let (current, is_new) = match existing {
        Some((token, handle)) => (CurrentSession { token, handle }, false),
        None => {
            let token = Uuid::new_v4().to_string();
            let handle = state.sessions.get_or_create(&token).await.map_err(|e| {
                error!("Failed to allocate session: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            let live_sessions = state.sessions.len().await;
            info!(live_sessions, "Issued session cookie");
            (CurrentSession { token, handle }, true)
        }
    };

    let cookie = is_new.then(|| session_cookie(&current.token));
    req.extensions_mut().insert(current);

    // 3. Continue to the handler
    let mut response = next.run(req).await;
    if let Some(cookie) = cookie {
        let value = HeaderValue::from_str(&cookie).map_err(|e| {
            error!("Invalid session cookie value: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// Extracts the session token from the `Cookie` header.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|token| !token.is_empty())
}

/// Browser-session cookie: no `Max-Age`, so it dies with the browser session.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE, token)
}

pub fn cleared_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}
