//! Shared type definitions: typed identifiers and formatting helpers.

pub mod duration;
pub mod id;
