//! Location domain entities.

pub mod model;

pub use model::{CreateLocation, Location};
