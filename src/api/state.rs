use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use handlebars::Handlebars;
use tokio::sync::Mutex;

use super::templates::templates;
use crate::core::AppConfig;
use crate::core::startup::Services;
use crate::session::Transcript;

/// A live conversation. Kept behind an async mutex so a session only
/// ever has one submission in flight.
pub type SessionHandle = Arc<Mutex<Transcript>>;

struct SessionEntry {
    handle: SessionHandle,
    last_used: Instant,
}

pub struct AppState {
    pub services: Services,
    pub templates: Handlebars<'static>,
    session_ttl: Duration,
    sessions: HashMap<String, SessionEntry>,
}

impl AppState {
    pub fn new(config: &AppConfig, services: Services) -> Self {
        Self {
            services,
            templates: templates(),
            session_ttl: config.session_ttl,
            sessions: HashMap::new(),
        }
    }

    /// Get the session for `id`, starting a new one if it doesn't
    /// exist yet.
    pub fn session(&mut self, id: &str) -> SessionHandle {
        let now = Instant::now();
        self.evict_idle(now);
        let entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| SessionEntry {
                handle: SessionHandle::default(),
                last_used: now,
            });
        entry.last_used = now;
        Arc::clone(&entry.handle)
    }

    pub fn find_session(&mut self, id: &str) -> Option<SessionHandle> {
        let now = Instant::now();
        self.evict_idle(now);
        self.sessions.get_mut(id).map(|entry| {
            entry.last_used = now;
            Arc::clone(&entry.handle)
        })
    }

    /// Drop the session and its transcript. Returns false if there was
    /// nothing to drop.
    pub fn end_session(&mut self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drop every session that hasn't been used within the TTL. A
    /// session whose handle is still held elsewhere is mid-submission
    /// and is kept.
    fn evict_idle(&mut self, now: Instant) {
        let ttl = self.session_ttl;
        self.sessions.retain(|id, entry| {
            let keep = Arc::strong_count(&entry.handle) > 1
                || now.saturating_duration_since(entry.last_used) <= ttl;
            if !keep {
                tracing::debug!("Dropping idle session {}", id);
            }
            keep
        });
    }
}
