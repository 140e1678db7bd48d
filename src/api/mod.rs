//! API route modules
//!
//! - [`health`] - liveness check
//! - [`download`] - image and thumbnail downloads

pub mod download;
pub mod health;

pub use crate::utils::{ApiResponse, AppResult};
