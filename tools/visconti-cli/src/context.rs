//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use visconti_client::ApiClient;
use visconti_commerce::cart::CartService;
use visconti_commerce::offer::OfferCache;
use visconti_store::LocalStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["visconti.toml", ".visconti.toml", "visconti.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        let config = config.with_backend_override(visconti_client::uri_from_env());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open local storage.
    pub fn store(&self) -> Result<LocalStore> {
        let dir = self.resolve_path(&self.config.storage.dir);
        LocalStore::open_dir(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))
    }

    /// The persisted cart.
    pub fn cart(&self) -> Result<CartService> {
        Ok(CartService::new(self.store()?))
    }

    /// The cached active offer.
    pub fn offers(&self) -> Result<OfferCache> {
        Ok(OfferCache::new(self.store()?))
    }

    /// Backend client.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(self.config.backend_config()).context("Failed to create HTTP client")
    }
}
