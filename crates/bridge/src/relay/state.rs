//! Relay lifecycle state and counters.

use std::fmt;

/// Where the relay is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// Waiting on `dequeue_request`
    Polling,
    /// Running a call and delivering its reply
    Executing,
    /// Done; the relay never polls again
    Stopped,
}

/// Why a relay stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The server reported another listener on the channel
    RedundantListener,
    /// The owner asked the relay to stop
    Shutdown,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::RedundantListener => write!(f, "redundant listener"),
            StopReason::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// Counters kept over a relay's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Answered `dequeue_request` calls
    pub polls: u64,
    /// Polls that ended without a call
    pub timeouts: u64,
    /// Dequeued calls that could not be executed
    pub malformed: u64,
    /// Dequeue attempts that got no answer from the server
    pub transport_errors: u64,
    /// Calls executed
    pub calls: u64,
    /// Replies accepted by the server
    pub delivered: u64,
    /// Replies replaced by the fallback
    pub fallbacks: u64,
    /// Replies for which the fallback failed too
    pub lost: u64,
}
