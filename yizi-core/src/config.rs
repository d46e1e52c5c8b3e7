//! Store configuration
//!
//! Settings come from `.env` files, `~/.yizi/config.toml` and the process
//! environment, with the environment winning.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Environment variable holding the store base URL
pub const ENV_URL: &str = "SUPABASE_URL";
/// Environment variable holding the anon API key
pub const ENV_KEY: &str = "SUPABASE_KEY";
/// Environment variable overriding the table name
pub const ENV_TABLE: &str = "YIZI_TABLE";

const DEFAULT_TABLE: &str = "characters";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.yizi/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path.display().to_string());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy never overwrites variables that are already set
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from {}", env_file.display());
                    loaded_from.push(env_file.display().to_string());
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found, using process environment only");
    } else {
        info!("Loaded environment from: {}", loaded_from.join(", "));
    }
}

/// The yizi config directory (~/.yizi)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".yizi"))
}

/// Path of the optional TOML config file (~/.yizi/config.toml)
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Where the TUI writes its log files (~/.yizi/logs)
pub fn log_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// On-disk layout of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub url: Option<String>,
    pub table: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Read a config file. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved settings for the remote character store
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project base URL, e.g. https://xyz.supabase.co (no trailing slash)
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Load .env files, the optional config file, then apply the environment
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        let file = match config_path() {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };
        Self::resolve(&file, |key| std::env::var(key).ok())
    }

    /// Merge the file config with variables from `env`; the environment wins
    pub fn resolve<F>(file: &FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let url = lookup(ENV_URL)
            .or_else(|| file.store.url.clone())
            .ok_or_else(|| ConfigError::missing(ENV_URL))?;
        let url = url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::invalid(ENV_URL, "must start with http:// or https://"));
        }

        let api_key = lookup(ENV_KEY).ok_or_else(|| ConfigError::missing(ENV_KEY))?;

        let table = lookup(ENV_TABLE)
            .or_else(|| file.store.table.clone())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let timeout_secs = file.store.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::invalid("store.timeout_secs", "must be positive"));
        }

        Ok(Self {
            url,
            api_key,
            table,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_resolve_from_env() {
        let cfg = StoreConfig::resolve(
            &FileConfig::default(),
            env_of(&[(ENV_URL, "https://demo.supabase.co/"), (ENV_KEY, "anon")]),
        )
        .unwrap();
        assert_eq!(cfg.url, "https://demo.supabase.co");
        assert_eq!(cfg.api_key, "anon");
        assert_eq!(cfg.table, "characters");
        assert_eq!(cfg.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            store: StoreSection {
                url: Some("https://file.example".to_string()),
                table: Some("chars".to_string()),
                timeout_secs: Some(5),
            },
        };
        let cfg = StoreConfig::resolve(&file, env_of(&[(ENV_KEY, "k")])).unwrap();
        assert_eq!(cfg.url, "https://file.example");
        assert_eq!(cfg.table, "chars");
        assert_eq!(cfg.timeout, Duration::from_secs(5));

        let cfg = StoreConfig::resolve(
            &file,
            env_of(&[(ENV_KEY, "k"), (ENV_URL, "https://env.example"), (ENV_TABLE, "t2")]),
        )
        .unwrap();
        assert_eq!(cfg.url, "https://env.example");
        assert_eq!(cfg.table, "t2");
    }

    #[test]
    fn test_missing_settings() {
        let err = StoreConfig::resolve(&FileConfig::default(), env_of(&[(ENV_KEY, "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref key } if key == ENV_URL));

        let err = StoreConfig::resolve(
            &FileConfig::default(),
            env_of(&[(ENV_URL, "https://x.example"), (ENV_KEY, "  ")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing { ref key } if key == ENV_KEY));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = StoreConfig::resolve(
            &FileConfig::default(),
            env_of(&[(ENV_URL, "ftp://x"), (ENV_KEY, "k")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let cfg = StoreConfig::resolve(
            &FileConfig::default(),
            env_of(&[(ENV_URL, "https://x.example"), (ENV_KEY, "secret-key")]),
        )
        .unwrap();
        assert!(!format!("{:?}", cfg).contains("secret-key"));
    }

    #[test]
    fn test_file_config_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(FileConfig::load(&path).unwrap().store.url.is_none());

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[store]\nurl = \"https://demo.supabase.co\"\ntimeout_secs = 3").unwrap();
        let cfg = FileConfig::load(&path).unwrap();
        assert_eq!(cfg.store.url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(cfg.store.timeout_secs, Some(3));

        std::fs::write(&path, "[store]\napi_key = \"nope\"\n").unwrap();
        assert!(matches!(FileConfig::load(&path), Err(ConfigError::Parse { .. })));
    }
}
