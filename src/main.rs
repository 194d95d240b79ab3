//! ParkHub Simulator — Mock Domain Store & Notification Playground
//!
//! Wires the store, event bus, and pump together, then walks through a
//! scripted booking day so every push event can be observed live.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use parkhub_core::config::AppConfig;
use parkhub_core::error::AppError;
use parkhub_core::events::names;
use parkhub_core::events::BusEvent;
use parkhub_core::types::id::{LocationId, ManagerId, SlotId, UserId};
use parkhub_entity::activity::{AlertSeverity, LogDirection, LogVehicle, RaiseAlert};
use parkhub_entity::booking::CreateBooking;
use parkhub_entity::notification::Audience;
use parkhub_entity::slot::{CreateSlot, CreateTenantSlot, LocationRef, UpdateSlot};
use parkhub_entity::user::UserRole;
use parkhub_realtime::{EventBus, EventPump};
use parkhub_store::seed::{demo_managers, seed_demo_data};
use parkhub_store::ParkingStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Simulator error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PARKHUB_ENV").unwrap_or_else(|_| "default".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main simulator run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Starting ParkHub simulator v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Build and seed the store ─────────────────────────
    let store = ParkingStore::new(&config.simulation, demo_managers());
    seed_demo_data(&store).await?;
    info!("Demo data seeded");

    // ── Step 2: Event bus + listeners ────────────────────────────
    let bus = Arc::new(EventBus::new(&config.simulation));
    register_listeners(&bus);
    bus.connect().await;

    // ── Step 3: Start the event pump ─────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let pump = EventPump::new(store.clone(), Arc::clone(&bus), &config.simulation);
    let pump_handle = tokio::spawn(async move {
        pump.run(shutdown_rx).await;
    });

    // ── Step 4: Scripted walkthrough ─────────────────────────────
    run_demo(&store).await?;

    // Let the pump deliver the tail of the script before idling.
    time::sleep(Duration::from_secs(1)).await;
    info!("Demo complete. Press Ctrl+C to exit.");

    // ── Step 5: Graceful shutdown ────────────────────────────────
    shutdown_signal().await;
    info!("Shutdown signal received, stopping...");
    let _ = shutdown_tx.send(true);
    let _ = time::timeout(Duration::from_secs(5), pump_handle).await;
    bus.disconnect();

    info!("ParkHub simulator shut down gracefully");
    Ok(())
}

/// Attach a logging listener to every known event name, plus a toast
/// printer for `notification`.
fn register_listeners(bus: &EventBus) {
    for name in names::ALL {
        bus.on(name, |event| {
            let payload = serde_json::to_string(event).unwrap_or_default();
            info!(event = event.name(), %payload, "Push event received");
        });
    }

    bus.on(names::NOTIFICATION, |event| {
        if let BusEvent::Notification {
            user_id, message, ..
        } = event
        {
            info!(user_id, "Inbox toast: {}", message);
        }
    });
}

/// Walk through one simulated day: list, book, patrol, cancel, submit,
/// approve, reject, and alert.
async fn run_demo(store: &ParkingStore) -> Result<(), AppError> {
    let slots = store.list_slots(None).await;
    info!(count = slots.len(), "Slots available at start of day");

    // An owner lists an extra slot in the seeded garage.
    store
        .create_slot(CreateSlot {
            slot_number: "B-4".to_string(),
            location: LocationRef::Existing {
                location_id: LocationId(1),
            },
            available_duration_minutes: 180,
            schedule: Vec::new(),
            owner_name: Some("Lena Fischer".to_string()),
            created_by: UserId(5),
        })
        .await?;

    // A driver books the first garage slot for two hours.
    let start = Utc::now() + chrono::Duration::hours(1);
    let booking = store
        .create_booking(CreateBooking {
            slot_id: SlotId(1),
            user_id: UserId(3),
            user_name: "Ava Patel".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(2),
            parking_duration_minutes: 120,
        })
        .await?;
    info!(booking_id = %booking.id, "Booking confirmed");

    // The slot is taken now, so a second attempt bounces.
    if let Err(e) = store
        .create_booking(CreateBooking {
            slot_id: SlotId(1),
            user_id: UserId(7),
            user_name: "Tomas Ruiz".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            parking_duration_minutes: 60,
        })
        .await
    {
        warn!(kind = %e.kind, "Second booking refused: {}", e.message);
    }

    // Security watches the car arrive and leave.
    store
        .log_vehicle(LogVehicle {
            slot_id: SlotId(1),
            plate: "KA-09-3412".to_string(),
            direction: LogDirection::Entry,
            logged_by: UserId(9),
        })
        .await?;
    store
        .log_vehicle(LogVehicle {
            slot_id: SlotId(1),
            plate: "KA-09-3412".to_string(),
            direction: LogDirection::Exit,
            logged_by: UserId(9),
        })
        .await?;

    // The freed slot gets rebooked, then the plans change.
    let evening = Utc::now() + chrono::Duration::hours(6);
    let second = store
        .create_booking(CreateBooking {
            slot_id: SlotId(1),
            user_id: UserId(3),
            user_name: "Ava Patel".to_string(),
            start_time: evening,
            end_time: evening + chrono::Duration::hours(2),
            parking_duration_minutes: 120,
        })
        .await?;
    store.cancel_booking(second.id, None).await?;

    // The admin shortens the small slot's booking window.
    store
        .update_slot(
            SlotId(2),
            UpdateSlot {
                available_duration_minutes: Some(90),
                ..UpdateSlot::default()
            },
        )
        .await?;

    // A manager submits a tenant slot and the admin approves it.
    let pending = store
        .create_tenant_slot(CreateTenantSlot {
            slot_number: "T-2".to_string(),
            location: LocationRef::New {
                name: "Tenant Annex".to_string(),
                address: "8 Mill Lane".to_string(),
            },
            available_duration_minutes: 300,
            schedule: Vec::new(),
            manager_id: ManagerId(1),
            tenant_name: "Acme Logistics".to_string(),
            tenant_contact: "ops@acme.example".to_string(),
            created_by: UserId(6),
        })
        .await?;
    store.approve_slot(pending.id).await?;

    // A second submission is turned down.
    let duplicate = store
        .create_tenant_slot(CreateTenantSlot {
            slot_number: "T-3".to_string(),
            location: LocationRef::Existing {
                location_id: LocationId(1),
            },
            available_duration_minutes: 300,
            schedule: Vec::new(),
            manager_id: ManagerId(2),
            tenant_name: "Blue Cafe".to_string(),
            tenant_contact: "hello@bluecafe.example".to_string(),
            created_by: UserId(8),
        })
        .await?;
    store
        .reject_slot(duplicate.id, Some("Covered by an existing slot".to_string()))
        .await?;

    // Security flags a blocked aisle.
    store
        .raise_alert(RaiseAlert {
            slot_id: Some(SlotId(2)),
            message: "Unattended vehicle blocking the aisle".to_string(),
            severity: AlertSeverity::Warning,
            raised_by: UserId(9),
        })
        .await?;

    // Inbox summary per audience, then the admin clears theirs.
    let admin_unread = store
        .unread_count(Audience::Role {
            role: UserRole::Admin,
        })
        .await;
    let user_unread = store
        .unread_count(Audience::Role {
            role: UserRole::User,
        })
        .await;
    let ava_unread = store
        .unread_count(Audience::User {
            user_id: UserId(3),
        })
        .await;
    let manager_unread = store
        .unread_count(Audience::Manager {
            manager_id: ManagerId(1),
        })
        .await;
    info!(
        admin_unread,
        user_unread, ava_unread, manager_unread, "Unread notifications by audience"
    );
    let cleared = store
        .mark_all_read(Audience::Role {
            role: UserRole::Admin,
        })
        .await?;
    info!(cleared, "Admin inbox cleared");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
