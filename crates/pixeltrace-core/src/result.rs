//! Convenience result type alias for PixelTrace.

use crate::error::AppError;

/// A specialized `Result` type for PixelTrace operations.
pub type AppResult<T> = Result<T, AppError>;
