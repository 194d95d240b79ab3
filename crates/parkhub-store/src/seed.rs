//! Demo seed data.
//!
//! Seeding goes through the public operations so every invariant holds,
//! then drops the staged events so a fresh process does not open with a
//! burst of stale emissions.

use chrono::{NaiveTime, Weekday};

use parkhub_core::types::id::{ManagerId, UserId};
use parkhub_core::{AppError, AppResult};
use parkhub_entity::location::CreateLocation;
use parkhub_entity::manager::Manager;
use parkhub_entity::slot::{AvailabilityRule, CreateSlot, LocationRef, RecurrencePattern};

use crate::store::ParkingStore;

/// The demo manager directory.
pub fn demo_managers() -> Vec<Manager> {
    vec![
        Manager {
            id: ManagerId::new(1),
            name: "Priya Sharma".into(),
            email: "priya.sharma@parkhub.example".into(),
            phone: "+1-555-0142".into(),
        },
        Manager {
            id: ManagerId::new(2),
            name: "Marcus Webb".into(),
            email: "marcus.webb@parkhub.example".into(),
            phone: "+1-555-0178".into(),
        },
    ]
}

fn time(hour: u32, minute: u32) -> AppResult<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| AppError::internal(format!("invalid seed time {hour}:{minute:02}")))
}

/// Populate a store with the demo locations and slots.
pub async fn seed_demo_data(store: &ParkingStore) -> AppResult<()> {
    let admin = UserId::new(1);
    let central = store
        .create_location(CreateLocation {
            name: "Central Garage".into(),
            address: "12 Harbor St".into(),
        })
        .await?;

    store
        .create_slot(CreateSlot {
            slot_number: "A-1".into(),
            location: LocationRef::Existing {
                location_id: central.id,
            },
            available_duration_minutes: 240,
            schedule: vec![AvailabilityRule {
                pattern: RecurrencePattern::Weekly {
                    days: vec![
                        Weekday::Mon,
                        Weekday::Tue,
                        Weekday::Wed,
                        Weekday::Thu,
                        Weekday::Fri,
                    ],
                },
                start_time: time(8, 0)?,
                end_time: time(20, 0)?,
                max_duration_minutes: 240,
                hourly_price: 3.5,
            }],
            owner_name: None,
            created_by: admin,
        })
        .await?;

    store
        .create_slot(CreateSlot {
            slot_number: "A-2".into(),
            location: LocationRef::Existing {
                location_id: central.id,
            },
            available_duration_minutes: 120,
            schedule: Vec::new(),
            owner_name: None,
            created_by: admin,
        })
        .await?;

    store
        .create_slot(CreateSlot {
            slot_number: "R-7".into(),
            location: LocationRef::New {
                name: "Riverside Lot".into(),
                address: "3 Quay Rd".into(),
            },
            available_duration_minutes: 480,
            schedule: Vec::new(),
            owner_name: Some("Sam Okafor".into()),
            created_by: UserId::new(4),
        })
        .await?;

    store.drain_staged().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkhub_core::config::simulation::SimulationConfig;
    use parkhub_entity::slot::SlotStatus;

    #[tokio::test(start_paused = true)]
    async fn test_seed_leaves_no_staged_events() {
        let store = ParkingStore::new(&SimulationConfig::default(), demo_managers());
        seed_demo_data(&store).await.unwrap();

        assert_eq!(store.list_locations().await.len(), 2);
        assert_eq!(store.list_slots(Some(SlotStatus::Available)).await.len(), 3);
        assert_eq!(store.list_managers().await.len(), 2);
        assert!(store.drain_staged().await.is_empty());
    }
}
