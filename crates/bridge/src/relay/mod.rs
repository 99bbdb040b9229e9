//! The relay loop.
//!
//! A [`Relay`] owns one channel: it polls the bridge server, executes each call it
//! receives and posts the reply before polling again.

mod poll;
mod run;
mod state;

pub use poll::classify;
pub use run::Relay;
pub use state::{RelayState, RelayStats, StopReason};
