//! Event dispatch and per-session execution
//!
//! The router is the thin shell between the transport and the dialog
//! engine: it validates and parses raw inbound events at the boundary,
//! then hands them to a per-session worker. Workers for different sessions
//! run independently; events for one session are processed strictly in
//! order, so rapid input cannot produce a lost-update race on the stored
//! state.

mod traits;
mod worker;

#[cfg(test)]
pub mod testing;

pub use traits::Presenter;
pub use worker::{EventError, SessionEvent, SessionWorker};

use crate::commerce::CommerceApi;
use crate::engine::{Event, InboundEvent, SessionContext};
use crate::store::SessionStore;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

const EVENT_QUEUE_DEPTH: usize = 32;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The inbound event carried no usable session id; it was dropped
    /// without touching any state.
    #[error("unroutable event: {0}")]
    Transport(String),

    /// The session's worker is gone; the event was not enqueued.
    #[error("session {0} is no longer accepting events")]
    SessionClosed(String),
}

/// Routes inbound events to per-session workers, creating them on first
/// contact. Holds the full dependency bundle; nothing is process-global.
pub struct SessionRouter<C, S, P>
where
    C: CommerceApi + 'static,
    S: SessionStore + 'static,
    P: Presenter + 'static,
{
    commerce: Arc<C>,
    store: Arc<S>,
    presenter: Arc<P>,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

struct SessionHandle {
    event_tx: mpsc::Sender<SessionEvent>,
    task: JoinHandle<()>,
}

impl<C, S, P> SessionRouter<C, S, P>
where
    C: CommerceApi + 'static,
    S: SessionStore + 'static,
    P: Presenter + 'static,
{
    pub fn new(commerce: C, store: S, presenter: P) -> Self {
        Self {
            commerce: Arc::new(commerce),
            store: Arc::new(store),
            presenter: Arc::new(presenter),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Validate, parse, and enqueue one inbound event.
    ///
    /// Returns as soon as the event is queued on its session; processing
    /// happens on the session's worker task.
    pub async fn dispatch(&self, inbound: InboundEvent) -> Result<(), DispatchError> {
        if inbound.session_id.trim().is_empty() {
            tracing::warn!(payload = %inbound.payload, "dropping event with no session id");
            return Err(DispatchError::Transport(
                "event carries no session id".to_string(),
            ));
        }

        let event = Event::from_payload(inbound.kind, &inbound.payload);
        let mut context = SessionContext::new(inbound.session_id.as_str());
        context.display_name = inbound.display_name;

        let event_tx = self.session_sender(&inbound.session_id).await;
        event_tx
            .send(SessionEvent { context, event })
            .await
            .map_err(|_| DispatchError::SessionClosed(inbound.session_id))
    }

    async fn session_sender(&self, session_id: &str) -> mpsc::Sender<SessionEvent> {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(session_id) {
                return handle.event_tx.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        // Lost the race: another dispatcher created the worker between locks.
        if let Some(handle) = sessions.get(session_id) {
            return handle.event_tx.clone();
        }

        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let worker = SessionWorker::new(
            self.commerce.clone(),
            self.store.clone(),
            self.presenter.clone(),
        );
        let task = tokio::spawn(worker.run(event_rx));
        tracing::debug!(session_id, "session worker started");

        sessions.insert(
            session_id.to_string(),
            SessionHandle {
                event_tx: event_tx.clone(),
                task,
            },
        );
        event_tx
    }

    /// Close every session queue and wait for in-flight events to drain.
    pub async fn shutdown(self) {
        let sessions = self.sessions.into_inner();
        for (session_id, handle) in sessions {
            drop(handle.event_tx);
            if let Err(err) = handle.task.await {
                tracing::error!(session_id = %session_id, error = %err, "session worker panicked");
            }
        }
    }
}
