//! In-memory session registry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::model::Session;

/// Owned store of live sessions, keyed by session id.
///
/// The map itself is guarded by an `RwLock` so concurrent creation and
/// lookup do not race; each entry carries its own `Mutex` so exchanges
/// against the same session serialize while distinct sessions proceed
/// independently. There is no ambient shared state beyond this registry.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new session under its id.
    pub async fn insert(&self, session: Session) -> Arc<Mutex<Session>> {
        let id = session.id.clone();
        let entry = Arc::new(Mutex::new(session));
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, entry.clone());
        entry
    }

    /// Looks up a session entry by id.
    pub async fn get(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Removes a session entry, returning it if present.
    pub async fn remove(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
