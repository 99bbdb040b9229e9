//! Local HTTP calls for the bridge.

mod request;
mod target;

pub use request::perform_http_request;
pub use target::build_target_url;
