//! Convenience result type alias for ParkHub.

use crate::error::AppError;

/// A specialized `Result` type for ParkHub operations.
///
/// Defined once so individual crates do not spell out
/// `Result<T, AppError>` everywhere.
pub type AppResult<T> = Result<T, AppError>;
