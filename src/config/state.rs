// Application state module
// Immutable shared state constructed once at startup

use chrono::{DateTime, Local};

use super::types::Config;

/// Application state shared across connections.
///
/// The route and content-type tables are fixed after startup; request
/// handling never mutates anything here, so no locking is needed.
pub struct AppState {
    pub config: Config,
    pub started_at: DateTime<Local>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started_at: Local::now(),
        }
    }
}
