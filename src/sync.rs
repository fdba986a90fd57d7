//! Multi-session hosting helpers.
//!
//! The core is single-threaded per session; a process hosting many games
//! wraps each session in its own lock. `SessionHost` is that wiring: a
//! registry of independently locked sessions sharing no mutable state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::session::{Session, SessionConfig};

/// A session behind its own lock, cheap to hand to transport tasks.
pub type SharedSession = Arc<Mutex<Session>>;

/// Identifier of a hosted session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SessionId(pub u64);

/// A registry of live sessions with per-session locks.
///
/// Operations within one session appear totally ordered through its mutex;
/// the registry lock is held only for lookup and insertion.
#[derive(Default)]
pub struct SessionHost {
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
    next_id: AtomicU64,
}

impl SessionHost {
    #[must_use]
    pub fn new() -> Self {
        SessionHost {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create and register a new session.
    pub fn create(&self, config: SessionConfig) -> (SessionId, SharedSession) {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = Arc::new(Mutex::new(Session::new(config)));
        self.sessions.write().insert(id, Arc::clone(&session));
        (id, session)
    }

    /// Look up a live session.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions.read().get(&id).cloned()
    }

    /// Drop a finished session from the registry. Outstanding handles keep
    /// the session alive until released.
    pub fn remove(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions.write().remove(&id)
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
