//! Session state persistence
//!
//! One persisted value per session id: the dialog state. Saves are
//! idempotent overwrites with last-write-wins semantics; there is no merge
//! and no transaction spanning a commerce call and a save (the window
//! between a successful commerce mutation and the save is an accepted
//! inconsistency).

mod memory;
mod sqlite;

pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;

use crate::engine::DialogState;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed to serve the request.
    #[error("session store unavailable: {0}")]
    Backend(String),

    /// A stored value is outside the dialog state enumeration. Surfaced
    /// rather than coerced; the writer side never produces this.
    #[error("invalid stored state {0:?}")]
    InvalidState(String),
}

/// Read/write contract on session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` if the session was never saved.
    async fn load(&self, session_id: &str) -> Result<Option<DialogState>, StoreError>;

    /// Idempotent overwrite; last write wins.
    async fn save(&self, session_id: &str, state: DialogState) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn load(&self, session_id: &str) -> Result<Option<DialogState>, StoreError> {
        (**self).load(session_id).await
    }

    async fn save(&self, session_id: &str, state: DialogState) -> Result<(), StoreError> {
        (**self).save(session_id, state).await
    }
}
