//! Location operations.

use chrono::Utc;
use tracing::info;

use parkhub_core::types::id::LocationId;
use parkhub_core::{AppError, AppResult};
use parkhub_entity::location::{CreateLocation, Location};

use crate::store::ParkingStore;

impl ParkingStore {
    /// Create a new location.
    pub async fn create_location(&self, req: CreateLocation) -> AppResult<Location> {
        let location = {
            let mut inner = self.write().await;
            if req.name.trim().is_empty() {
                return Err(AppError::validation("Location name cannot be empty"));
            }
            if req.address.trim().is_empty() {
                return Err(AppError::validation("Location address cannot be empty"));
            }
            let location = Location {
                id: inner.next_location_id(),
                name: req.name,
                address: req.address,
                created_at: Utc::now(),
            };
            inner.locations.push(location.clone());
            location
        };

        info!(location_id = %location.id, name = %location.name, "Location created");
        self.simulate_latency().await;
        Ok(location)
    }

    /// Remove a location that no slot references.
    ///
    /// A location still referenced by slots cannot be deleted; the slots
    /// must be deleted or moved first.
    pub async fn delete_location(&self, id: LocationId) -> AppResult<()> {
        {
            let mut inner = self.write().await;
            inner.location(id)?;
            let referencing = inner
                .slots
                .iter()
                .filter(|s| s.location_id == Some(id))
                .count();
            if referencing > 0 {
                return Err(AppError::conflict(format!(
                    "Cannot delete location with {referencing} slot(s). Delete or move the slots first."
                )));
            }
            inner.locations.retain(|l| l.id != id);
        }

        info!(location_id = %id, "Location deleted");
        self.simulate_latency().await;
        Ok(())
    }

    /// List all locations in creation order.
    pub async fn list_locations(&self) -> Vec<Location> {
        self.simulate_latency().await;
        self.read().await.locations.clone()
    }

    /// Fetch a single location.
    pub async fn get_location(&self, id: LocationId) -> AppResult<Location> {
        self.simulate_latency().await;
        self.read().await.location(id).cloned()
    }
}
