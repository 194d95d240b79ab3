//! Manager directory reads.

use parkhub_core::types::id::ManagerId;
use parkhub_core::AppResult;
use parkhub_entity::manager::Manager;

use crate::store::ParkingStore;

impl ParkingStore {
    /// List the manager directory.
    pub async fn list_managers(&self) -> Vec<Manager> {
        self.simulate_latency().await;
        self.read().await.managers.clone()
    }

    /// Fetch a single manager.
    pub async fn get_manager(&self, id: ManagerId) -> AppResult<Manager> {
        self.simulate_latency().await;
        self.read().await.manager(id).cloned()
    }
}
