//! Service modules
//!
//! - [`archive`] - in-memory ZIP construction for batch downloads

pub mod archive;
