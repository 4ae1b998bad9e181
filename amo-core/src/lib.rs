//! amo-core - Foundation types for the amoCRM API client.
//!
//! This crate provides the shared foundation used by the other workspace
//! crates:
//! - Client configuration (credentials, base domain, headers)
//! - The error taxonomy covering API, transport, and local failures
//! - Structured logging with tracing
//! - Provider constants (API version, page limits, entity type tags)
//! - Input-sanity validators and epoch-second time helpers

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod time;
pub mod validate;

// Re-export commonly used items at the crate root
pub use config::AmoConfig;
pub use error::{AmoError, AmoResult};
pub use logging::init_logging;
