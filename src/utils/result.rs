//! Unified Result Types
//!
//! Type alias for the Result type used across handlers and application logic.

use crate::utils::AppError;

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;
