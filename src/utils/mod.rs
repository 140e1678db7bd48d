//! Utility module
//!
//! - [`AppError`] / [`ApiResponse`] - structured errors and response envelope
//! - [`logger`] - tracing setup
//! - [`AppResult`] - handler result alias

pub mod error;
pub mod logger;
pub mod result;

pub use error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
pub use result::AppResult;
