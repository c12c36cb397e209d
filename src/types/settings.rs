use serde::{Deserialize, Serialize};

use crate::platform;

pub const DEFAULT_FEED_CAPACITY: usize = 256;
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application settings persisted as JSON by the settings engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Location of the SQLite row store.
    pub database_path: String,
    /// Buffered events per change-feed subscriber before it is considered lagged.
    pub feed_capacity: usize,
    /// Where unauthenticated visitors are sent.
    pub login_path: String,
    /// `tracing` env-filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: platform::get_data_dir()
                .join("linkshelf.db")
                .to_string_lossy()
                .to_string(),
            feed_capacity: DEFAULT_FEED_CAPACITY,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
