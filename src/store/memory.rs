//! In-memory session store

use super::{SessionStore, StoreError};
use crate::engine::DialogState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local store backed by a map. Suitable for tests and single-node
/// embedding; state does not survive a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, DialogState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<DialogState>, StoreError> {
        Ok(self.sessions.read().unwrap().get(session_id).copied())
    }

    async fn save(&self, session_id: &str, state: DialogState) -> Result<(), StoreError> {
        self.sessions
            .write()
            .unwrap()
            .insert(session_id.to_string(), state);
        Ok(())
    }
}
