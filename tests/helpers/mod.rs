//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use parkhub_core::config::simulation::SimulationConfig;
use parkhub_core::events::{names, BusEvent};
use parkhub_core::types::id::{SlotId, UserId};
use parkhub_entity::booking::CreateBooking;
use parkhub_realtime::{EventBus, EventPump};
use parkhub_store::seed::{demo_managers, seed_demo_data};
use parkhub_store::ParkingStore;

/// Store, bus, and pump wired together, with a recorder subscribed to
/// every event name so tests can assert on the published stream.
pub struct TestHarness {
    pub store: ParkingStore,
    pump: EventPump,
    recorded: Arc<Mutex<Vec<BusEvent>>>,
}

impl TestHarness {
    /// Build a seeded harness. The seed's own events are already
    /// drained, so the recorder starts empty.
    pub async fn new() -> Self {
        let config = SimulationConfig::default();
        let store = ParkingStore::new(&config, demo_managers());
        seed_demo_data(&store)
            .await
            .expect("Failed to seed demo data");

        let bus = Arc::new(EventBus::new(&config));
        let recorded = Arc::new(Mutex::new(Vec::new()));
        for name in names::ALL {
            let sink = Arc::clone(&recorded);
            bus.on(name, move |event| {
                sink.lock().expect("recorder poisoned").push(event.clone());
            });
        }

        let pump = EventPump::new(store.clone(), Arc::clone(&bus), &config);

        Self {
            store,
            pump,
            recorded,
        }
    }

    /// Publish everything currently staged.
    pub async fn pump(&self) -> usize {
        self.pump.pump_once().await
    }

    /// Everything the bus has dispatched so far.
    pub fn recorded(&self) -> Vec<BusEvent> {
        self.recorded.lock().expect("recorder poisoned").clone()
    }

    /// Names of the dispatched events, in dispatch order.
    pub fn recorded_names(&self) -> Vec<&'static str> {
        self.recorded().iter().map(|e| e.name()).collect()
    }

    /// Forget the events recorded so far.
    pub fn clear_recorded(&self) {
        self.recorded.lock().expect("recorder poisoned").clear();
    }
}

/// A two-hour booking request starting an hour from now.
pub fn booking_for(slot_id: SlotId, user_id: i64, user_name: &str) -> CreateBooking {
    let start = Utc::now() + chrono::Duration::hours(1);
    CreateBooking {
        slot_id,
        user_id: UserId(user_id),
        user_name: user_name.to_string(),
        start_time: start,
        end_time: start + chrono::Duration::hours(2),
        parking_duration_minutes: 120,
    }
}
