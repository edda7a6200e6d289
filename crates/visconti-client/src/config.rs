//! Backend location and timeouts.

use std::time::Duration;

/// Environment variable holding the backend base URL, as the website reads it.
pub const BACKEND_URI_ENV: &str = "VITE_BACKEND_URI";

/// Alternative name for [`BACKEND_URI_ENV`] outside the website build.
pub const BACKEND_URI_ENV_ALT: &str = "VISCONTI_BACKEND_URI";

/// Base URL used when no environment variable is set.
pub const DEFAULT_BACKEND_URI: &str = "http://localhost:5000/";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL, normalized to end in `/`.
    pub base_uri: String,
    /// Total request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl BackendConfig {
    /// Create a config for `base_uri` with default timeouts.
    pub fn new(base_uri: impl Into<String>) -> Self {
        let mut base_uri = base_uri.into().trim().to_string();
        if !base_uri.ends_with('/') {
            base_uri.push('/');
        }
        Self {
            base_uri,
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(3),
        }
    }

    /// Read the base URL from the environment, falling back to localhost.
    pub fn from_env() -> Self {
        Self::new(uri_from_env().unwrap_or_else(|| DEFAULT_BACKEND_URI.to_string()))
    }

    /// Set the total timeout. The connect timeout is a quarter of it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = timeout / 4;
        self
    }

    /// URL of `api/<path>`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}api/{}", self.base_uri, path.trim_start_matches('/'))
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URI)
    }
}

/// Backend URL from the environment, if set and non-empty.
pub fn uri_from_env() -> Option<String> {
    [BACKEND_URI_ENV, BACKEND_URI_ENV_ALT]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
