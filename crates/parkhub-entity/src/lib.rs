//! # parkhub-entity
//!
//! Domain entity models for Metro ParkHub. Every struct in this crate
//! represents a record held by the in-memory store or a command/value
//! object passed into it. All entities derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.

pub mod activity;
pub mod booking;
pub mod location;
pub mod manager;
pub mod notification;
pub mod slot;
pub mod user;
