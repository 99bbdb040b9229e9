use std::env::var;

use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging; `verbose` raises the default level to DEBUG.
///
/// `RUST_LOG` still takes precedence over the default level.
pub fn init(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    initialize_tracing(level);
}

/// Initialize tracing subscriber with default configuration.
fn initialize_tracing(level: LevelFilter) {
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let log_format = var("RUST_LOG_FORMAT").ok();

    let log_layer = match log_format.as_deref() {
        Some("json") => tracing_subscriber::fmt::layer().json().with_filter(env_filter).boxed(),
        _ => tracing_subscriber::fmt::layer().compact().with_filter(env_filter).boxed(),
    };

    tracing_subscriber::registry().with(log_layer).init();

    if let Some(format) = log_format.filter(|format| !matches!(format.as_str(), "json" | "compact")) {
        warn!("Unknown RUST_LOG_FORMAT {format:?}, using compact output");
    }
}
