//! Core types shared across the crate
//!
//! - `ConfigError` - fatal startup error taxonomy

pub mod error;

pub use error::{ConfigError, ConfigResult};
