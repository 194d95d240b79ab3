//! Manager domain entities.

pub mod model;

pub use model::Manager;
