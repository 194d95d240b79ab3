//! Event pump: publishes staged store events onto the bus.
//!
//! Store operations never emit directly; they stage envelopes into the
//! outbox and resolve. The pump drains that outbox and emits each event
//! after a short delay, so subscriber notification is fire-and-forget
//! relative to the operation that caused it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use parkhub_core::config::simulation::SimulationConfig;
use parkhub_store::ParkingStore;

use crate::bus::EventBus;

/// Drains the store outbox onto the event bus.
#[derive(Debug, Clone)]
pub struct EventPump {
    store: ParkingStore,
    bus: Arc<EventBus>,
    emit_delay: Duration,
    poll_interval: Duration,
}

impl EventPump {
    /// Create a pump over the given store and bus.
    pub fn new(store: ParkingStore, bus: Arc<EventBus>, config: &SimulationConfig) -> Self {
        Self {
            store,
            bus,
            emit_delay: config.emit_delay(),
            poll_interval: config.pump_poll_interval(),
        }
    }

    /// Drain and publish everything currently staged, in staging order,
    /// returning how many events went out.
    ///
    /// The emit delay is applied once per batch, modelling the gap
    /// between an operation resolving and its push notifications
    /// arriving.
    pub async fn pump_once(&self) -> usize {
        let staged = self.store.drain_staged().await;
        if staged.is_empty() {
            return 0;
        }
        time::sleep(self.emit_delay).await;
        let count = staged.len();
        for envelope in staged {
            debug!(
                event = envelope.event.name(),
                envelope_id = %envelope.id,
                "Publishing staged event"
            );
            self.bus.emit(&envelope.event);
        }
        count
    }

    /// Poll the outbox until the cancel signal flips, then flush once
    /// more so nothing staged by the final operations is lost.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Event pump started"
        );

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Event pump received shutdown signal");
                        break;
                    }
                }
                _ = time::sleep(self.poll_interval) => {
                    self.pump_once().await;
                }
            }
        }

        let flushed = self.pump_once().await;
        if flushed > 0 {
            debug!(flushed, "Flushed remaining staged events");
        }
        info!("Event pump stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkhub_core::events::names;
    use parkhub_core::types::id::UserId;
    use parkhub_entity::location::CreateLocation;
    use parkhub_entity::slot::{CreateSlot, LocationRef};
    use parkhub_store::seed::demo_managers;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn wired() -> (ParkingStore, Arc<EventBus>, EventPump) {
        let config = SimulationConfig::default();
        let store = ParkingStore::new(&config, demo_managers());
        let bus = Arc::new(EventBus::new(&config));
        let pump = EventPump::new(store.clone(), Arc::clone(&bus), &config);
        (store, bus, pump)
    }

    async fn create_slot(store: &ParkingStore) {
        store
            .create_slot(CreateSlot {
                slot_number: "A-1".into(),
                location: LocationRef::New {
                    name: "Central Garage".into(),
                    address: "1 Main St".into(),
                },
                available_duration_minutes: 60,
                schedule: Vec::new(),
                owner_name: None,
                created_by: UserId::new(1),
            })
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pump_once_publishes_staged_events() {
        let (store, bus, pump) = wired();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            bus.on(names::SLOT_CREATED, move |event| {
                seen.lock().unwrap().push(event.name());
            });
        }

        create_slot(&store).await;
        let published = pump.pump_once().await;

        assert_eq!(published, 1);
        assert_eq!(*seen.lock().unwrap(), vec!["slot_created"]);
        // Drained means gone: a second pass finds nothing.
        assert_eq!(pump.pump_once().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pump_once_idles_on_empty_outbox() {
        let (_store, _bus, pump) = wired();
        assert_eq!(pump.pump_once().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_without_subscribers_are_dropped() {
        let (store, _bus, pump) = wired();
        store
            .create_location(CreateLocation {
                name: "Central Garage".into(),
                address: "1 Main St".into(),
            })
            .await
            .unwrap();
        create_slot(&store).await;

        // One staged event, no subscriber anywhere: it still drains.
        assert_eq!(pump.pump_once().await, 1);
        assert_eq!(pump.pump_once().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_and_flushes_on_shutdown() {
        let (store, bus, pump) = wired();
        let seen = Arc::new(AtomicUsize::new(0));
        {
            let seen = Arc::clone(&seen);
            bus.on(names::SLOT_CREATED, move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            });
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let runner = {
            let pump = pump.clone();
            tokio::spawn(async move { pump.run(cancel_rx).await })
        };

        create_slot(&store).await;
        // Let the poll loop pick the event up.
        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        // Stage another and shut down; the final flush must publish it.
        create_slot(&store).await;
        cancel_tx.send(true).unwrap();
        runner.await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
