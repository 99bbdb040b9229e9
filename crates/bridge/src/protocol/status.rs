//! Status codes with a fixed meaning on the bridge wire.

/// Call completed, or reply accepted
pub const OK: u16 = 200;

/// The relay could not perform the requested action
pub const SYSTEM_ERROR: u16 = 500;

/// `dequeue_request` wait window elapsed without a call
pub const REQUEST_TIMEOUT: u16 = 408;

/// Another listener already owns the channel
pub const TOO_MANY_REQUESTS: u16 = 429;

/// The server refused a reply because of its size
pub const PAYLOAD_TOO_LARGE: u16 = 413;

/// The local call never produced an HTTP response
pub const LOCAL_FAILURE: u16 = 0;
