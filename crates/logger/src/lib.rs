//! Logging setup shared by the bridge binaries.

mod tracing;

pub use crate::tracing::init;
