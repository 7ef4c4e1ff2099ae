//! Logging utilities for the Flexwin crates.
//!
//! Sets up a `tracing` subscriber with an `EnvFilter`. `RUST_LOG` is honoured
//! and the configured level is added as a directive for the `flexwin` crates.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use flexwin_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG); // no-op, already initialised
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Repeated calls are ignored.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for target in ["flexwin_client", "flexwin_config", "flexwin_cli"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize from a configured level name such as `"debug"`.
///
/// Unknown or missing names fall back to INFO.
pub fn init_from_config(level: Option<&str>) {
    init_with_level(parse_level(level));
}

fn parse_level(level: Option<&str>) -> Level {
    level
        .and_then(|name| name.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}
