//! Authentication module
//!
//! JWT bearer verification and middleware:
//! - [`JwtService`] - token validation service
//! - [`CurrentUser`] - current user context
//! - [`require_auth`] - auth middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
