//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use visconti_carousel::CarouselConfig;
use visconti_client::{BackendConfig, DEFAULT_BACKEND_URI};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend configuration.
    #[serde(default)]
    pub backend: BackendSection,

    /// Local storage configuration.
    #[serde(default)]
    pub storage: StorageSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Carousel timing and gestures.
    #[serde(default)]
    pub carousel: CarouselConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Let a backend URL from the environment win over the file.
    pub fn with_backend_override(mut self, uri: Option<String>) -> Self {
        if let Some(uri) = uri {
            self.backend.uri = uri;
        }
        self
    }

    /// Client settings for the configured backend.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(self.backend.uri.clone())
            .with_timeout(Duration::from_secs(self.backend.timeout_secs.max(1)))
    }
}

/// Backend location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    /// Base URL of the storefront API.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_uri() -> String {
    DEFAULT_BACKEND_URI.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where cart and offer state is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    /// Storage directory, relative to the working directory unless absolute.
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    ".visconti".to_string()
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
    ///
    /// Logs go to stderr so command output stays parseable.
    pub fn init(&self, verbose: bool) {
        let level = if verbose { "debug" } else { self.level.as_str() };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let result = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
        if let Err(e) = result {
            eprintln!("logging already initialized: {e}");
        }
    }
}

/// Generate a default visconti.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Visconti storefront configuration

[backend]
# Overridden by VITE_BACKEND_URI when set.
uri = "{uri}"
timeout_secs = 10

[storage]
dir = ".visconti"

[logging]
level = "warn"
format = "pretty"

[carousel]
auto_advance_ms = 4000
settle_delay_ms = 500
min_swipe_distance = 50.0
max_swipe_duration_ms = 1000
auto_play = true
"#,
        uri = DEFAULT_BACKEND_URI
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.backend.uri, DEFAULT_BACKEND_URI);
        assert_eq!(config.storage.dir, ".visconti");
        assert_eq!(config.carousel, CarouselConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_backend_override() {
        let config = CliConfig::default().with_backend_override(Some("https://api.visconti.example".into()));
        assert_eq!(config.backend_config().endpoint("menu"), "https://api.visconti.example/api/menu");

        let unchanged = CliConfig::default().with_backend_override(None);
        assert_eq!(unchanged.backend.uri, DEFAULT_BACKEND_URI);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visconti.json");
        std::fs::write(&path, r#"{"storage": {"dir": "/var/lib/visconti"}}"#).unwrap();

        let loaded = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.storage.dir, "/var/lib/visconti");
    }
}
