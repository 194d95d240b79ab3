//! # parkhub-realtime
//!
//! The simulated push-notification channel: a named-event bus standing in
//! for a real-time transport, plus the pump that publishes store-staged
//! events onto it.

pub mod bus;
pub mod pump;

pub use bus::{EventBus, SubscriptionId};
pub use pump::EventPump;
