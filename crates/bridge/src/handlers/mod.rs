//! Call handlers for the bridge.
//!
//! This module turns a dequeued call into a reply: plain HTTP calls go to the local
//! target, the synthetic `version` and `webbrowser` commands are answered in place.

pub mod browser;
pub mod http;
pub mod response;
pub mod translator;
pub mod validation;

pub use browser::{BrowserLauncher, SystemBrowser};
pub use http::{build_target_url, perform_http_request};
pub use response::{
    build_browser_failure_envelope, build_envelope, build_fallback_envelope,
    build_local_failure_envelope, build_ok_envelope, build_version_envelope,
};
pub use translator::CallTranslator;
pub use validation::validate_call_spec;
