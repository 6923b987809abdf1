//! Logging setup utilities for Hibiki binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose spans and events are enabled at the default level.
const WORKSPACE_CRATES: &[&str] = &["hibiki_server", "hibiki_shared", "tower_http"];

/// Build the default filter directive for the given binary.
///
/// Hyphens are replaced with underscores because tracing targets use the
/// Rust module path of the crate.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");

    let mut directives: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|name| format!("{}={}", name, default_log_level))
        .collect();

    if !WORKSPACE_CRATES.contains(&binary_target.as_str()) {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }

    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hibiki-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hibiki_shared::logger::setup_logger;
///
/// setup_logger("hibiki-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
