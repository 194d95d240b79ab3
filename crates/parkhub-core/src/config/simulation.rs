//! Simulated-latency configuration.
//!
//! The store and event channel are in-process simulations of a remote
//! backend; these knobs control the artificial delays that make them feel
//! like one.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Artificial delay settings for the mock backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Latency added to every store operation before it resolves, in
    /// milliseconds. Models a network round-trip; failures surface before
    /// this delay.
    #[serde(default = "default_op_latency")]
    pub op_latency_ms: u64,
    /// Delay before the event channel reports itself connected, in
    /// milliseconds.
    #[serde(default = "default_connect_delay")]
    pub connect_delay_ms: u64,
    /// Delay between draining staged events and emitting them on the bus,
    /// in milliseconds.
    #[serde(default = "default_emit_delay")]
    pub emit_delay_ms: u64,
    /// How often the event pump polls the store outbox, in milliseconds.
    #[serde(default = "default_pump_poll_interval")]
    pub pump_poll_interval_ms: u64,
}

impl SimulationConfig {
    /// Per-operation latency as a [`Duration`].
    pub fn op_latency(&self) -> Duration {
        Duration::from_millis(self.op_latency_ms)
    }

    /// Connection delay as a [`Duration`].
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    /// Emit delay as a [`Duration`].
    pub fn emit_delay(&self) -> Duration {
        Duration::from_millis(self.emit_delay_ms)
    }

    /// Pump poll interval as a [`Duration`].
    pub fn pump_poll_interval(&self) -> Duration {
        Duration::from_millis(self.pump_poll_interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            op_latency_ms: default_op_latency(),
            connect_delay_ms: default_connect_delay(),
            emit_delay_ms: default_emit_delay(),
            pump_poll_interval_ms: default_pump_poll_interval(),
        }
    }
}

fn default_op_latency() -> u64 {
    350
}

fn default_connect_delay() -> u64 {
    1000
}

fn default_emit_delay() -> u64 {
    150
}

fn default_pump_poll_interval() -> u64 {
    100
}
