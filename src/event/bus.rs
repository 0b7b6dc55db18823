//! In-process event bus with immediate and deferred dispatch.
//!
//! The bus owns the only state shared across concurrent callers in the
//! orchestration core: the handler registry and the deferred queue. Handler
//! registration and removal are safe under concurrent publish.

use crate::event::domain::{DomainEvent, EventKind, SubscriptionId};
use crate::event::ports::EventHandler;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How a handler receives events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Invoked synchronously inside `publish`, in registration order.
    Immediate,
    /// Invoked by the background drain loop, in publish order.
    Deferred,
}

#[derive(Clone)]
struct Registration {
    id: SubscriptionId,
    handler: Arc<dyn EventHandler>,
}

#[derive(Default)]
struct HandlerRegistry {
    immediate: HashMap<EventKind, Vec<Registration>>,
    deferred: HashMap<EventKind, Vec<Registration>>,
}

impl HandlerRegistry {
    fn table_mut(&mut self, mode: DispatchMode) -> &mut HashMap<EventKind, Vec<Registration>> {
        match mode {
            DispatchMode::Immediate => &mut self.immediate,
            DispatchMode::Deferred => &mut self.deferred,
        }
    }
}

/// Publishes domain events to registered handlers.
///
/// Immediate handlers run inside the publishing call, in registration
/// order. Deferred handlers receive events through an unbounded FIFO queue
/// drained by a single background loop, so per-kind publish order is
/// preserved. A failing handler is logged and isolated: it never aborts the
/// publish, the drain loop, or other handlers.
///
/// The bus carries no ambient global state; construct one instance and
/// inject it into every component that publishes or subscribes.
pub struct EventBus {
    registry: Arc<RwLock<HandlerRegistry>>,
    sender: Mutex<Option<mpsc::UnboundedSender<DomainEvent>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl EventBus {
    /// Creates a bus with no registered handlers.
    ///
    /// The background drain loop starts lazily with the first deferred
    /// subscription.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(HandlerRegistry::default())),
            sender: Mutex::new(None),
            worker: Mutex::new(None),
        }
    }

    /// Registers a handler for one event kind.
    ///
    /// Returns the subscription handle required by [`Self::unsubscribe`].
    /// The first [`DispatchMode::Deferred`] registration starts the drain
    /// loop; starting it twice is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the first deferred registration happens outside a tokio
    /// runtime, because the drain loop must be spawned onto one.
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: Arc<dyn EventHandler>,
        mode: DispatchMode,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        {
            let mut registry = self
                .registry
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            registry
                .table_mut(mode)
                .entry(kind)
                .or_default()
                .push(Registration {
                    id,
                    handler,
                });
        }
        tracing::debug!(kind = %kind, ?mode, subscription = %id, "registered event handler");

        if mode == DispatchMode::Deferred {
            self.ensure_drain_loop();
        }
        id
    }

    /// Removes a previously registered handler.
    ///
    /// Returns `true` when a registration was removed; unsubscribing an
    /// unknown handle is an idempotent no-op.
    pub fn unsubscribe(&self, kind: EventKind, subscription: SubscriptionId) -> bool {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut removed = false;
        let registry = &mut *registry;
        for table in [&mut registry.immediate, &mut registry.deferred] {
            if let Some(registrations) = table.get_mut(&kind) {
                let before = registrations.len();
                registrations.retain(|registration| registration.id != subscription);
                removed |= registrations.len() != before;
            }
        }
        if removed {
            tracing::debug!(kind = %kind, subscription = %subscription, "removed event handler");
        }
        removed
    }

    /// Delivers an event to every handler registered for its kind.
    ///
    /// Immediate handlers observe the event first; only then is it enqueued
    /// for deferred processing. Events published after [`Self::stop`] still
    /// reach immediate handlers, but the deferred enqueue is skipped.
    pub async fn publish(&self, event: &DomainEvent) {
        let immediate = self.immediate_handlers(event.kind());
        for registration in immediate {
            if let Err(err) = registration.handler.handle(event).await {
                tracing::error!(
                    kind = %event.kind(),
                    subscription = %registration.id,
                    %err,
                    "immediate event handler failed",
                );
            }
        }

        if !self.has_deferred_handlers(event.kind()) {
            return;
        }
        let sender = {
            let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
            guard.clone()
        };
        match sender {
            Some(sender) if sender.send(event.clone()).is_ok() => {}
            _ => {
                tracing::warn!(
                    kind = %event.kind(),
                    "deferred queue unavailable, event not enqueued",
                );
            }
        }
    }

    /// Returns every kind with at least one registration, in no particular
    /// order.
    #[must_use]
    pub fn subscribed_kinds(&self) -> Vec<EventKind> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        let mut kinds: Vec<EventKind> = registry
            .immediate
            .keys()
            .chain(registry.deferred.keys())
            .copied()
            .collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds.dedup();
        kinds
    }

    /// Returns the number of handlers registered for a kind across both
    /// dispatch modes.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        let immediate = registry.immediate.get(&kind).map_or(0, Vec::len);
        let deferred = registry.deferred.get(&kind).map_or(0, Vec::len);
        immediate + deferred
    }

    /// Shuts the deferred pipeline down gracefully.
    ///
    /// Closes the queue to new deferred work, then waits for the drain loop
    /// to deliver everything enqueued before shutdown was requested.
    /// Idempotent; calling it on a bus that never started the loop returns
    /// immediately.
    pub async fn stop(&self) {
        {
            let mut guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
            guard.take();
        }
        let worker = {
            let mut guard = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
            guard.take()
        };
        if let Some(worker) = worker {
            if let Err(err) = worker.await {
                tracing::error!(%err, "event drain loop terminated abnormally");
            }
            tracing::debug!("event bus stopped");
        }
    }

    fn immediate_handlers(&self, kind: EventKind) -> Vec<Registration> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.immediate.get(&kind).cloned().unwrap_or_default()
    }

    fn has_deferred_handlers(&self, kind: EventKind) -> bool {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry
            .deferred
            .get(&kind)
            .is_some_and(|registrations| !registrations.is_empty())
    }

    fn ensure_drain_loop(&self) {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if sender.is_some() {
            return;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        *sender = Some(tx);
        let registry = Arc::clone(&self.registry);
        let handle = tokio::spawn(drain_loop(registry, rx));
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        *worker = Some(handle);
        tracing::debug!("event drain loop started");
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains the deferred queue until every sender is gone and the queue is
/// empty.
///
/// Handlers are looked up per event at dispatch time, so subscriptions and
/// removals made while the loop runs affect subsequent deliveries.
async fn drain_loop(
    registry: Arc<RwLock<HandlerRegistry>>,
    mut queue: mpsc::UnboundedReceiver<DomainEvent>,
) {
    while let Some(event) = queue.recv().await {
        let handlers = {
            let guard = registry.read().unwrap_or_else(PoisonError::into_inner);
            guard.deferred.get(&event.kind()).cloned().unwrap_or_default()
        };
        for registration in handlers {
            if let Err(err) = registration.handler.handle(&event).await {
                tracing::error!(
                    kind = %event.kind(),
                    subscription = %registration.id,
                    %err,
                    "deferred event handler failed",
                );
            }
        }
    }
}
