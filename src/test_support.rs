//! Shared helpers for unit tests.

use crate::event::domain::{DomainEvent, EventKind};
use crate::event::ports::{EventHandler, HandlerError, HandlerResult};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// An [`EventHandler`] that records every event it receives.
///
/// Construct with [`RecordingHandler::failing`] to make every invocation
/// return an error after recording, for handler-isolation tests.
pub(crate) struct RecordingHandler {
    events: Mutex<Vec<DomainEvent>>,
    fail: bool,
}

impl RecordingHandler {
    pub(crate) const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) const fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn events(&self) -> Vec<DomainEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn kinds(&self) -> Vec<EventKind> {
        self.events().iter().map(DomainEvent::kind).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn handle(&self, event: &DomainEvent) -> HandlerResult {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        if self.fail {
            return Err(HandlerError::message("recording handler configured to fail"));
        }
        Ok(())
    }
}
