//! Shared server state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use retouch_core::{EditorSession, TempFileStore};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::ApiError;

pub type Session = EditorSession<TempFileStore>;

#[derive(Debug)]
struct SessionSlot {
    session: Arc<Mutex<Session>>,
    last_used: Instant,
}

/// Configuration plus one editing session per client.
///
/// The table lock is only held to look a session up; rendering holds the
/// session's own lock so clients don't wait on each other.
#[derive(Debug)]
pub struct AppState {
    config: ServerConfig,
    sessions: Mutex<HashMap<Uuid, SessionSlot>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Start an empty session and return its id.
    ///
    /// Sessions idle for longer than the configured TTL are dropped first.
    pub fn create_session(&self) -> Uuid {
        self.evict_idle(Instant::now());

        let store = match &self.config.download_dir {
            Some(dir) => TempFileStore::in_dir(dir.clone()),
            None => TempFileStore::new(),
        };
        let id = Uuid::new_v4();
        let slot = SessionSlot {
            session: Arc::new(Mutex::new(EditorSession::new(store))),
            last_used: Instant::now(),
        };
        self.sessions.lock().insert(id, slot);
        info!(session = %id, "Session created");
        id
    }

    /// Drop a session. Returns false if it didn't exist.
    pub fn remove_session(&self, id: Uuid) -> bool {
        let removed = self.sessions.lock().remove(&id).is_some();
        if removed {
            info!(session = %id, "Session removed");
        }
        removed
    }

    /// Drop every session not used since `now - ttl`. Returns how many went.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let ttl = self.config.session_ttl();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|id, slot| {
            let keep = now.saturating_duration_since(slot.last_used) < ttl;
            if !keep {
                debug!(session = %id, "Idle session evicted");
            }
            keep
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }

    /// Run `f` with exclusive access to a session and mark it as used.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, ApiError> {
        let session = {
            let mut sessions = self.sessions.lock();
            let slot = sessions
                .get_mut(&id)
                .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
            slot.last_used = Instant::now();
            Arc::clone(&slot.session)
        };
        let mut guard = session.lock();
        Ok(f(&mut guard))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}
