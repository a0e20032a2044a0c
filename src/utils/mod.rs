//! Utility functions: percent-encoding and configuration.

pub mod config;
pub mod encoding;

pub use config::{resolve_api_base, AppConfig};
pub use encoding::percent_encode;
