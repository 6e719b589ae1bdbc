//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:5000").
    pub bind_addr: String,

    /// Path to the SQLite database file.
    pub db_path: PathBuf,

    /// Directory holding the pre-built front-end bundle.
    pub asset_dir: PathBuf,

    /// Allow link-preview fetches against loopback/private addresses.
    /// Off by default; only enable for local development.
    pub preview_allow_private: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional (all have defaults for local development):
    /// - `SLATED_BIND_ADDR`: Server bind address (default: "0.0.0.0:5000")
    /// - `SLATED_DB_PATH`: SQLite file path (default: "slated.db")
    /// - `SLATED_ASSET_DIR`: Front-end bundle directory (default: "frontend/build")
    /// - `SLATED_PREVIEW_ALLOW_PRIVATE`: "1"/"true" to allow private-address
    ///   preview fetches (default: off)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("SLATED_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let db_path = std::env::var("SLATED_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("slated.db"));

        let asset_dir = std::env::var("SLATED_ASSET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("frontend/build"));

        let preview_allow_private = std::env::var("SLATED_PREVIEW_ALLOW_PRIVATE")
            .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "True"))
            .unwrap_or(false);

        tracing::info!(
            bind_addr = %bind_addr,
            db_path = %db_path.display(),
            asset_dir = %asset_dir.display(),
            preview_allow_private,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            db_path,
            asset_dir,
            preview_allow_private,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "SLATED_BIND_ADDR",
        "SLATED_DB_PATH",
        "SLATED_ASSET_DIR",
        "SLATED_PREVIEW_ALLOW_PRIVATE",
    ];

    /// Helper to run config tests with isolated env vars.
    /// Uses a mutex to prevent concurrent env var races.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:5000");
            assert_eq!(config.db_path, PathBuf::from("slated.db"));
            assert_eq!(config.asset_dir, PathBuf::from("frontend/build"));
            assert!(!config.preview_allow_private);
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("SLATED_BIND_ADDR", "127.0.0.1:9090"),
                ("SLATED_DB_PATH", "/var/lib/slated/calendar.db"),
                ("SLATED_ASSET_DIR", "/srv/slated/build"),
                ("SLATED_PREVIEW_ALLOW_PRIVATE", "true"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9090");
                assert_eq!(config.db_path, PathBuf::from("/var/lib/slated/calendar.db"));
                assert_eq!(config.asset_dir, PathBuf::from("/srv/slated/build"));
                assert!(config.preview_allow_private);
            },
        );
    }

    #[test]
    fn config_allow_private_rejects_garbage() {
        with_env_vars(&[("SLATED_PREVIEW_ALLOW_PRIVATE", "yes please")], || {
            let config = Config::from_env().unwrap();
            assert!(!config.preview_allow_private);
        });
    }
}
