//! Named-event publish/subscribe bus.
//!
//! Dispatch is synchronous and in registration order. Delivery is
//! best-effort: an event with no registered handler is dropped, not
//! queued, and nothing catches a panicking handler, so one aborts the
//! rest of that dispatch.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::info;

use parkhub_core::config::simulation::SimulationConfig;
use parkhub_core::events::BusEvent;

/// Token returned by [`EventBus::on`]; hand it back to remove that
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&BusEvent) + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    handler: Handler,
}

/// The simulated push channel.
///
/// Starts disconnected; [`EventBus::connect`] brings it up after the
/// configured delay. The connection flag is advisory only, mirroring a
/// UI connectivity indicator, and does not gate dispatch.
pub struct EventBus {
    /// Event name → subscribers, in registration order.
    handlers: DashMap<String, Vec<Subscriber>>,
    next_id: AtomicU64,
    connected: AtomicBool,
    connect_delay: Duration,
}

impl EventBus {
    /// Create a disconnected bus.
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            handlers: DashMap::new(),
            next_id: AtomicU64::new(1),
            connected: AtomicBool::new(false),
            connect_delay: config.connect_delay(),
        }
    }

    /// Register a handler for one event name.
    ///
    /// Multiple handlers per name are permitted and run in the order
    /// they were registered.
    pub fn on(
        &self,
        event_name: impl Into<String>,
        handler: impl Fn(&BusEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .entry(event_name.into())
            .or_default()
            .push(Subscriber {
                id,
                handler: Arc::new(handler),
            });
        id
    }

    /// Remove one handler by its subscription token. Returns whether a
    /// handler was actually removed.
    pub fn off(&self, event_name: &str, subscription: SubscriptionId) -> bool {
        let Some(mut entry) = self.handlers.get_mut(event_name) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|s| s.id != subscription);
        let removed = entry.len() < before;
        if entry.is_empty() {
            drop(entry);
            self.handlers.remove(event_name);
        }
        removed
    }

    /// Remove every handler for an event name, returning how many there
    /// were.
    pub fn off_all(&self, event_name: &str) -> usize {
        self.handlers
            .remove(event_name)
            .map(|(_, subscribers)| subscribers.len())
            .unwrap_or(0)
    }

    /// Synchronously invoke every handler registered for this event's
    /// name. No handler registered means the event is dropped.
    pub fn emit(&self, event: &BusEvent) {
        // Snapshot the handlers first so one of them can call on/off
        // without deadlocking against the map.
        let snapshot: Vec<Handler> = match self.handlers.get(event.name()) {
            Some(entry) => entry.iter().map(|s| Arc::clone(&s.handler)).collect(),
            None => return,
        };
        for handler in snapshot {
            handler(event);
        }
    }

    /// Check the simulated channel state.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Bring the channel up after the configured delay, then emit
    /// `connect`. There is no automatic reconnection.
    pub async fn connect(&self) {
        tokio::time::sleep(self.connect_delay).await;
        self.connected.store(true, Ordering::Relaxed);
        info!("Simulated push channel connected");
        self.emit(&BusEvent::Connect);
    }

    /// Drop the channel and emit `disconnect`.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::Relaxed);
        info!("Simulated push channel disconnected");
        self.emit(&BusEvent::Disconnect);
    }

    /// Number of handlers currently registered for an event name.
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers.get(event_name).map(|e| e.len()).unwrap_or(0)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("event_names", &self.handlers.len())
            .field("connected", &self.is_connected())
            .finish()
    }
}
