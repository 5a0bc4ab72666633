use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use dashmap::DashMap;
use formguard_core::Session;
use uuid::Uuid;

use crate::config::defaults::{MAX_SESSIONS, SESSION_IDLE_TIMEOUT_SECS};

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(SESSION_IDLE_TIMEOUT_SECS);
/// Upper bound on live sessions per store.
pub const DEFAULT_MAX_SESSIONS: usize = MAX_SESSIONS;

/// Session kept in process memory.
#[derive(Debug)]
pub struct MemorySession {
    id: ArcSwap<String>,
    values: DashMap<String, serde_json::Value>,
    last_seen: ArcSwap<Instant>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::with_id(new_session_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: ArcSwap::from_pointee(id.into()),
            values: DashMap::new(),
            last_seen: ArcSwap::from_pointee(Instant::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last_seen(&self) -> Instant {
        **self.last_seen.load()
    }

    fn touch(&self) {
        self.last_seen.store(Arc::new(Instant::now()));
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for MemorySession {
    fn id(&self) -> String {
        String::clone(&self.id.load())
    }

    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.get(key).map(|value| value.clone())
    }

    fn set(&self, key: &str, value: serde_json::Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key).map(|(_, value)| value)
    }

    fn migrate(&self) {
        self.id.store(Arc::new(new_session_id()));
    }
}

fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// All live sessions, indexed by id.
///
/// Only sessions holding data are kept. Idle sessions expire, and once the
/// store is full the least recently seen session makes room for a new one.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, Arc<MemorySession>>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Live session with the given id. Expired sessions are dropped here.
    pub fn find(&self, id: &str) -> Option<Arc<MemorySession>> {
        let session = self.sessions.get(id).map(|session| Arc::clone(&session))?;

        if session.last_seen().elapsed() >= self.idle_timeout {
            self.sessions.remove(id);
            tracing::debug!("Dropped expired session");
            return None;
        }

        session.touch();
        Some(session)
    }

    /// Look up the session with the given id, or start a new one.
    ///
    /// Unknown ids are not adopted; a client cannot pick its own session id.
    /// A new session is only kept once [`save`](Self::save) finds data in it.
    pub fn load_or_create(&self, id: Option<&str>) -> Arc<MemorySession> {
        if let Some(session) = id.and_then(|id| self.find(id)) {
            return session;
        }

        Arc::new(MemorySession::new())
    }

    /// Store a session after a request, re-indexing it if its id changed
    /// since it was loaded.
    ///
    /// Returns whether the session is kept. Empty sessions are discarded.
    pub fn save(&self, previous_id: &str, session: &Arc<MemorySession>) -> bool {
        let current_id = session.id();
        if current_id != previous_id {
            self.sessions.remove(previous_id);
        }

        if session.is_empty() {
            self.sessions.remove(&current_id);
            return false;
        }

        if !self.sessions.contains_key(&current_id) {
            self.make_room();
        }

        session.touch();
        self.sessions.insert(current_id, Arc::clone(session));
        true
    }

    /// Drop every expired session. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_seen().elapsed() < self.idle_timeout);
        before.saturating_sub(self.sessions.len())
    }

    fn make_room(&self) {
        if self.sessions.len() < self.max_sessions {
            return;
        }

        let purged = self.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }

        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().last_seen())
                .map(|entry| entry.key().clone());

            let Some(oldest) = oldest else { break };
            self.sessions.remove(&oldest);
            tracing::warn!(
                max_sessions = self.max_sessions,
                "Session store full, evicted oldest session"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
