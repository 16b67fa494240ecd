//! Per-session event processing
//!
//! One worker per session, owning that session's event queue. Each event is
//! handled end-to-end (load state, transition, persist state) before the
//! next is taken, which gives per-session ordering without any global lock.

use crate::commerce::CommerceApi;
use crate::engine::{DialogEngine, DialogState, Event, SessionContext};
use crate::store::{SessionStore, StoreError};
use crate::runtime::Presenter;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// A parsed event routed to one session's worker.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub context: SessionContext,
    pub event: Event,
}

/// Failure to fully process one event. Commerce failures are not in here:
/// they abort the transition but the event itself is handled (failure
/// notice rendered, prior state kept).
#[derive(Debug, Error)]
pub enum EventError {
    /// The session store failed; the event was not processed and a reliable
    /// transport may redeliver it. No internal retry.
    #[error("session store: {0}")]
    Store(#[from] StoreError),
}

pub struct SessionWorker<C, S, P>
where
    C: CommerceApi,
    S: SessionStore,
    P: Presenter,
{
    engine: DialogEngine<C, P>,
    store: Arc<S>,
    presenter: Arc<P>,
}

impl<C, S, P> SessionWorker<C, S, P>
where
    C: CommerceApi,
    S: SessionStore,
    P: Presenter,
{
    pub fn new(commerce: Arc<C>, store: Arc<S>, presenter: Arc<P>) -> Self {
        Self {
            engine: DialogEngine::new(commerce, presenter.clone()),
            store,
            presenter,
        }
    }

    /// Drain the session's queue until every sender is gone.
    pub async fn run(self, mut events: mpsc::Receiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            if let Err(err) = self.process_event(&event).await {
                tracing::error!(
                    session_id = %event.context.session_id,
                    error = %err,
                    "event processing failed"
                );
            }
        }
        tracing::debug!("session worker stopped");
    }

    /// Handle one event: load (or force) the state, transition, persist.
    ///
    /// Exactly one state value is persisted per handled event, even when
    /// the transition is a no-op. An aborted transition persists nothing.
    pub async fn process_event(&self, message: &SessionEvent) -> Result<(), EventError> {
        let session_id = &message.context.session_id;

        // Restart bypasses the stored state entirely; otherwise absence of
        // a stored value means the session is brand new.
        let current = if message.event.is_restart() {
            DialogState::Start
        } else {
            self.store.load(session_id).await?.unwrap_or_default()
        };

        match self
            .engine
            .transition(&message.context, current, &message.event)
            .await
        {
            Ok(next) => {
                self.store.save(session_id, next).await?;
                tracing::debug!(
                    session_id = %session_id,
                    from = current.as_str(),
                    to = next.as_str(),
                    "transition persisted"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(
                    session_id = %session_id,
                    state = current.as_str(),
                    error = %err,
                    "commerce call failed; transition aborted"
                );
                self.presenter.render_failure(session_id).await;
                Ok(())
            }
        }
    }
}
