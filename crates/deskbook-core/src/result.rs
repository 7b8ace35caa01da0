//! Convenience result type alias for DeskBook.

use crate::error::AppError;

/// A specialized `Result` type for DeskBook operations.
pub type AppResult<T> = Result<T, AppError>;
