//! Registry mapping task IDs to their sessions
//!
//! Entries are never removed: an exited session stays registered so its
//! buffered output remains retrievable, which also means the map grows for
//! the lifetime of the program. There is no reap operation by design.

use std::sync::Arc;

use dashmap::DashMap;

use super::session::TaskSession;

/// Owner of all sessions, keyed by caller-supplied task ID
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<TaskSession>>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a session under a task ID
    pub fn register(&self, task_id: String, session: Arc<TaskSession>) {
        self.sessions.insert(task_id, session);
    }

    /// Check whether a task ID is taken
    pub fn contains(&self, task_id: &str) -> bool {
        self.sessions.contains_key(task_id)
    }

    /// Look up a session by task ID
    pub fn get(&self, task_id: &str) -> Option<Arc<TaskSession>> {
        self.sessions.get(task_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Number of registered sessions, exited ones included
    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// All registered task IDs
    pub fn task_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|entry| entry.key().clone()).collect()
    }
}
