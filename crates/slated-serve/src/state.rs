//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use slated_core::Store;

use crate::config::Config;

/// Timeout for outbound link-preview fetches. A slow remote must not hold
/// a request indefinitely.
const PREVIEW_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of redirects followed during a preview fetch.
const PREVIEW_REDIRECT_LIMIT: usize = 5;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Calendar store (single SQLite connection behind a mutex).
    pub store: Store,

    /// Outbound HTTP client for link-preview fetches.
    pub http: reqwest::Client,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from configuration: opens the database
    /// (bootstrapping the schema) and builds the outbound client once.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::open(&config.db_path)?;

        let http = reqwest::Client::builder()
            .timeout(PREVIEW_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(PREVIEW_REDIRECT_LIMIT))
            .user_agent(concat!("slated/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            store,
            http,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by an in-memory database, for handler tests.
    pub(crate) fn for_tests() -> Self {
        let config = Config {
            bind_addr: "127.0.0.1:0".to_string(),
            db_path: ":memory:".into(),
            asset_dir: "frontend/build".into(),
            preview_allow_private: false,
        };
        Self {
            store: Store::open_in_memory().expect("in-memory store"),
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}
