//! Relay configuration for the bridge.
//!
//! This module defines the configuration options for a relay instance.

mod file;
mod methods;
mod types;

pub use file::{FileConfig, RelaySection};
pub use types::{RelayConfig, RelayConfigBuilder};
