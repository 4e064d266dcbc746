//! Hook event dispatching
//!
//! Routes one decoded payload to the single handler registered for its
//! event and collects the result. Absence of a handler is a first-class,
//! reportable condition, never a silent no-op.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::payload::HookPayload;
use super::response::HookResponse;
use super::{HookEvent, HookHandler};

/// Dispatch failure conditions surfaced to the transport
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Configuration error: the event reached a process with no handler
    /// bound to it. Not transient; never retried.
    #[error("no handler registered for event '{0}'")]
    NoHandler(HookEvent),

    /// The registered handler itself failed
    #[error("handler for '{0}' failed: {1}")]
    Handler(HookEvent, eyre::Report),
}

/// Table mapping each event to at most one handler
#[derive(Default)]
pub struct HookDispatcher {
    handlers: HashMap<HookEvent, Arc<dyn HookHandler>>,
}

impl HookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event
    ///
    /// A second registration for the same event replaces the first; the
    /// displaced handler is returned.
    pub fn register(&mut self, event: HookEvent, handler: Arc<dyn HookHandler>) -> Option<Arc<dyn HookHandler>> {
        self.handlers.insert(event, handler)
    }

    pub fn has_handler(&self, event: HookEvent) -> bool {
        self.handlers.contains_key(&event)
    }

    /// Events with a handler bound, in taxonomy order
    pub fn registered(&self) -> Vec<HookEvent> {
        HookEvent::ALL
            .into_iter()
            .filter(|e| self.handlers.contains_key(e))
            .collect()
    }

    /// Route a payload to its handler and collect the result
    ///
    /// The lookup key is the payload's own variant tag, so a handler
    /// registered for an event only ever sees payloads of that event. A
    /// handler error propagates unmodified inside [`DispatchError::Handler`];
    /// there is no retry, timeout, or fallback here.
    pub async fn dispatch(&self, payload: &HookPayload) -> Result<Option<HookResponse>, DispatchError> {
        let event = payload.event();
        let handler = self.handlers.get(&event).ok_or(DispatchError::NoHandler(event))?;

        log::debug!("Dispatching {} payload", event);
        handler
            .handle(payload)
            .await
            .map_err(|e| DispatchError::Handler(event, e))
    }
}
