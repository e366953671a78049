//! Chat session store: one conversation log per session id, bounded in size and swept for
//! idle sessions.

use certdesk_core::{ConversationLog, ConversationMessage};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

struct ChatSession {
    log: ConversationLog,
    last_active: Instant,
}

pub(crate) struct SessionStore {
    sessions: DashMap<Uuid, ChatSession>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub(crate) fn new(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions,
            idle_timeout,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub(crate) fn contains(&self, id: &Uuid) -> bool {
        self.sessions.contains_key(id)
    }

    /// Opens a session seeded with the greeting. Idle sessions are swept first when the
    /// store is full; returns `None` if it is still full afterwards.
    pub(crate) fn open(&self) -> Option<Uuid> {
        if self.sessions.len() >= self.max_sessions {
            self.evict_idle();
            if self.sessions.len() >= self.max_sessions {
                return None;
            }
        }
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            ChatSession {
                log: ConversationLog::with_greeting(),
                last_active: Instant::now(),
            },
        );
        Some(id)
    }

    /// Runs `f` on the session's log while holding its entry, and marks the session active.
    pub(crate) fn with_log<R>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut ConversationLog) -> R,
    ) -> Option<R> {
        let mut session = self.sessions.get_mut(id)?;
        session.last_active = Instant::now();
        Some(f(&mut session.log))
    }

    pub(crate) fn messages(&self, id: &Uuid) -> Option<Vec<ConversationMessage>> {
        self.with_log(id, |log| log.messages().to_vec())
    }

    pub(crate) fn close(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drops every session idle for at least the configured timeout. Returns how many went.
    pub(crate) fn evict_idle(&self) -> usize {
        let before = self.sessions.len();
        let timeout = self.idle_timeout;
        self.sessions.retain(|_, s| s.last_active.elapsed() < timeout);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::info!(target: "certdesk::gateway", evicted, "idle chat sessions dropped");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_seeds_greeting_and_respects_capacity() {
        let store = SessionStore::new(2, Duration::from_secs(600));
        let a = store.open().unwrap();
        assert!(store.open().is_some());
        assert!(store.open().is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.messages(&a).unwrap().len(), 1);
    }

    #[test]
    fn open_reclaims_idle_sessions_when_full() {
        let store = SessionStore::new(1, Duration::ZERO);
        let first = store.open().unwrap();
        let second = store.open().unwrap();
        assert!(!store.contains(&first));
        assert!(store.contains(&second));
    }

    #[test]
    fn evict_idle_keeps_recent_sessions() {
        let store = SessionStore::new(10, Duration::from_secs(600));
        let id = store.open().unwrap();
        assert_eq!(store.evict_idle(), 0);
        assert!(store.contains(&id));

        let store = SessionStore::new(10, Duration::ZERO);
        store.open().unwrap();
        store.open().unwrap();
        assert_eq!(store.evict_idle(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn close_removes_session_once() {
        let store = SessionStore::new(10, Duration::from_secs(600));
        let id = store.open().unwrap();
        assert!(store.close(&id));
        assert!(!store.close(&id));
        assert!(store.with_log(&id, |log| log.len()).is_none());
    }
}
