//! Configuration loading for CrateNote
//!
//! Configuration is resolved in priority order:
//! 1. Explicit path (command-line argument, highest priority)
//! 2. `CRATENOTE_CONFIG` environment variable
//! 3. Platform config directory (e.g. `~/.config/cratenote/config.toml`)
//! 4. Compiled defaults (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "CRATENOTE_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

/// Discogs API access settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Discogs REST API
    pub base_url: String,
    /// User-Agent header sent with every request (required by Discogs)
    pub user_agent: String,
    /// Personal access token; anonymous access when absent
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.discogs.com".to_string(),
            user_agent: "CrateNote/0.1.0 (+https://github.com/cratenote/cratenote)".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Entity-name cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Key namespace prefix, e.g. "discogs" yields keys like "discogs-artist-123"
    pub namespace: String,
    /// Entry time-to-live in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: "discogs".to_string(),
            // Artist names and release titles essentially never change
            ttl_secs: 30 * 24 * 3600,
        }
    }
}

impl CacheConfig {
    /// TTL as a [`Duration`]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Config {
    /// Load configuration following the priority order documented at module
    /// level. A missing default config file is not an error; compiled
    /// defaults are used instead. An explicitly named file must exist.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return Self::from_file(Path::new(&path));
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No config file found, using compiled defaults");
        Ok(Self::default())
    }

    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading configuration");
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Default configuration file path for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cratenote").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.discogs.com");
        assert!(config.api.token.is_none());
        assert_eq!(config.cache.namespace, "discogs");
        assert_eq!(config.cache.ttl(), Duration::from_secs(30 * 24 * 3600));
    }

    #[test]
    fn from_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[api]
token = "secret"
timeout_secs = 5

[cache]
namespace = "test"
ttl_secs = 3600
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api.token.as_deref(), Some("secret"));
        assert_eq!(config.api.timeout_secs, 5);
        // Unset fields keep their defaults
        assert_eq!(config.api.base_url, "https://api.discogs.com");
        assert_eq!(config.cache.namespace, "test");
        assert_eq!(config.cache.ttl_secs, 3600);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn from_file_rejects_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbroken").unwrap();
        let result = Config::from_file(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
