//! Tracing setup.
//!
//! `RUST_LOG` wins over the configured filter. `LINKSHELF_LOG_FORMAT=json`
//! switches to JSON lines.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init_tracing(default_filter: &str) -> bool {
    let log_format = std::env::var("LINKSHELF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    result.is_ok()
}
