use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::models::ChatTurn;

/// Per-session state held in the store.
#[derive(Debug, Clone)]
struct SessionEntry {
    turns: Vec<ChatTurn>,
    last_activity: Instant,
}

impl SessionEntry {
    fn new(turns: Vec<ChatTurn>) -> Self {
        Self {
            turns,
            last_activity: Instant::now(),
        }
    }
}

/// Thread-safe in-memory session store keyed by client-supplied id.
///
/// A session appears on first write and lives until explicitly cleared, the
/// eviction sweep removes it, or the process restarts. Concurrent requests on
/// the same id read and write whole turn vectors; last write wins, which is
/// the accepted behavior for interleaved requests on one session.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        info!("Initializing session store (ttl: {:?})", ttl);
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Snapshot of a session's history. Unknown ids start empty.
    pub fn history(&self, session_id: &str) -> Vec<ChatTurn> {
        self.sessions
            .get(session_id)
            .map(|entry| entry.turns.clone())
            .unwrap_or_default()
    }

    /// Replace a session's history, creating the session if absent.
    pub fn set(&self, session_id: &str, turns: Vec<ChatTurn>) {
        self.sessions
            .insert(session_id.to_string(), SessionEntry::new(turns));
        debug!("Updated session {}", session_id);
    }

    /// Remove a session. Idempotent; clearing an unknown id is a no-op.
    pub fn clear(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_some() {
            debug!("Cleared session {}", session_id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle longer than the configured ttl.
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions
            .retain(|_, entry| entry.last_activity.elapsed() <= ttl);
        let removed = before.saturating_sub(self.sessions.len());

        if removed > 0 {
            info!("Evicted {} idle session(s)", removed);
        }
        removed
    }

    /// Spawn the periodic eviction sweep on the given interval.
    pub fn start_eviction_task(&self, every: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                store.cleanup_expired();
            }
        });
    }
}
