//! Inbox notification operations.

use tracing::info;

use parkhub_core::types::id::NotificationId;
use parkhub_core::{AppError, AppResult};
use parkhub_entity::notification::{Audience, Notification};

use crate::store::ParkingStore;

impl ParkingStore {
    /// List an audience's notifications in creation order.
    pub async fn list_notifications(&self, audience: Audience) -> Vec<Notification> {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .notifications
            .iter()
            .filter(|n| n.audience == audience)
            .cloned()
            .collect()
    }

    /// Count an audience's unread notifications.
    pub async fn unread_count(&self, audience: Audience) -> usize {
        self.simulate_latency().await;
        let inner = self.read().await;
        inner
            .notifications
            .iter()
            .filter(|n| n.audience == audience && n.is_unread())
            .count()
    }

    /// Mark one notification as read.
    ///
    /// Marking an already-read notification is a no-op, not an error;
    /// an unknown id is reported as not found.
    pub async fn mark_notification_read(&self, id: NotificationId) -> AppResult<()> {
        {
            let mut inner = self.write().await;
            let notification = inner
                .notifications
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;
            notification.is_read = true;
        }
        self.simulate_latency().await;
        Ok(())
    }

    /// Mark all of an audience's notifications as read, returning how
    /// many were still unread.
    pub async fn mark_all_read(&self, audience: Audience) -> AppResult<usize> {
        let marked = {
            let mut inner = self.write().await;
            let mut marked = 0;
            for notification in inner
                .notifications
                .iter_mut()
                .filter(|n| n.audience == audience && !n.is_read)
            {
                notification.is_read = true;
                marked += 1;
            }
            marked
        };

        info!(marked, "Marked notifications read");
        self.simulate_latency().await;
        Ok(marked)
    }
}
