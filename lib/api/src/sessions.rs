use genrescope_core::{DataStore, Session, SessionSnapshot};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::error::ApiError;

/// Bounds on how many sessions are kept and for how long.
#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    /// A session untouched for longer than this is dropped
    pub idle_timeout: Duration,
    /// Opening a session past this count drops the least recently used one
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

struct Entry {
    session: Session,
    last_access: Instant,
}

/// Live client sessions keyed by id.
///
/// Each session owns its selection cells; the store they read is shared.
/// Idle sessions are swept whenever a new one is opened.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    limits: SessionLimits,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            limits,
        }
    }

    #[inline]
    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Open a session on the default selections.
    pub fn create(&self, store: &DataStore) -> Result<(Uuid, SessionSnapshot), ApiError> {
        let session = Session::new(store)?;
        let snapshot = session.snapshot();
        let id = Uuid::new_v4();
        let now = Instant::now();

        let mut sessions = self.sessions.write();
        evict_idle(&mut sessions, now, self.limits.idle_timeout);
        while !sessions.is_empty() && sessions.len() >= self.limits.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::debug!(session = %oldest, "Session evicted at capacity");
            }
        }
        sessions.insert(
            id,
            Entry {
                session,
                last_access: now,
            },
        );
        drop(sessions);

        tracing::info!(session = %id, "Session opened");
        Ok((id, snapshot))
    }

    pub fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, ApiError> {
        self.update(id, |session| Ok(session.snapshot()))
    }

    /// Run `f` against one session while holding the registry lock.
    pub fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let mut sessions = self.sessions.write();
        let entry = sessions.get_mut(&id).ok_or(ApiError::SessionNotFound(id))?;
        entry.last_access = Instant::now();
        f(&mut entry.session)
    }

    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            tracing::info!(session = %id, "Session closed");
        }
        removed
    }

    /// Drop every session idle for longer than the timeout as of `now`.
    /// Returns how many were dropped.
    pub fn evict_idle_at(&self, now: Instant) -> usize {
        evict_idle(&mut self.sessions.write(), now, self.limits.idle_timeout)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, Entry>, now: Instant, idle_timeout: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| now.saturating_duration_since(entry.last_access) <= idle_timeout);
    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::debug!(evicted, "Idle sessions evicted");
    }
    evicted
}
