//! services/api/src/adapters/session_store.rs
//!
//! The in-memory implementation of the `SessionStore` port. Sessions live only
//! for the lifetime of the process and are never written anywhere.
//!
//! Visitors rarely say goodbye, so sessions left idle longer than the configured
//! TTL are dropped lazily: a lookup of an idle session misses, and every
//! allocation sweeps the map first. No background task is involved.

use async_trait::async_trait;
use chrono::Utc;
use lexinary_core::ports::{PortResult, SessionHandle, SessionStore};
use lexinary_core::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};

/// How long a session may sit unused before it is discarded.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

struct StoredSession {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Keeps every live session in a map keyed by the opaque cookie token.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
    idle_ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}

impl InMemorySessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    fn is_idle(&self, stored: &StoredSession, now: Instant) -> bool {
        now.saturating_duration_since(stored.last_seen) > self.idle_ttl
    }

    fn evict_idle(&self, sessions: &mut HashMap<String, StoredSession>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_idle(stored, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, "Evicted idle sessions");
        }
    }
}

//=========================================================================================
// `SessionStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_ref: &str) -> Option<SessionHandle> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let stored = sessions.get_mut(session_ref)?;
        if self.is_idle(stored, now) {
            sessions.remove(session_ref);
            debug!("Idle session expired on lookup");
            return None;
        }
        stored.last_seen = now;
        Some(stored.handle.clone())
    }

    async fn get_or_create(&self, session_ref: &str) -> PortResult<SessionHandle> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now);

        let stored = sessions
            .entry(session_ref.to_string())
            .or_insert_with(|| {
                let session = Session::new(Utc::now());
                info!(user_id = %session.user_id, "Allocated new session");
                StoredSession {
                    handle: Arc::new(Mutex::new(session)),
                    last_seen: now,
                }
            });
        stored.last_seen = now;
        Ok(stored.handle.clone())
    }

    async fn end(&self, session_ref: &str) -> PortResult<()> {
        if self.sessions.write().await.remove(session_ref).is_some() {
            debug!("Session ended and discarded");
        }
        Ok(())
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
