use std::time::Duration;

use url::Url;

use crate::error::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_AUTH_PATH: &str = "auth";

/// Backend connection settings.
///
/// Required field (`base_url`) is a constructor parameter. Everything else
/// has a default and is overridden with `with_*` methods.
///
/// ```rust,ignore
/// use rider_auth::ApiConfig;
///
/// let config = ApiConfig::new("https://api.example.com/v1".parse()?)
///     .with_timeout(std::time::Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ApiConfig {
    pub(crate) base_url: Url,
    pub(crate) auth_path: String,
    pub(crate) timeout: Duration,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            auth_path: DEFAULT_AUTH_PATH.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `RIDER_API_URL`: backend base URL
    ///
    /// # Optional env vars
    /// - `RIDER_API_TIMEOUT_SECS`: per-request timeout in seconds (default 15)
    /// - `RIDER_AUTH_PATH`: path segment the auth endpoints live under (default `auth`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `RIDER_API_URL` is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, Error> {
        let base_url: Url = std::env::var("RIDER_API_URL")
            .map_err(|_| Error::Config("RIDER_API_URL is required".into()))?
            .parse()
            .map_err(|e| Error::Config(format!("RIDER_API_URL: {e}")))?;

        let mut config = Self::new(base_url);

        if let Ok(secs) = std::env::var("RIDER_API_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("RIDER_API_TIMEOUT_SECS: {e}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Ok(path) = std::env::var("RIDER_AUTH_PATH") {
            config = config.with_auth_path(path);
        }

        Ok(config)
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the path the auth endpoints are mounted under.
    #[must_use]
    pub fn with_auth_path(mut self, path: impl Into<String>) -> Self {
        self.auth_path = path.into().trim_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn auth_path(&self) -> &str {
        &self.auth_path
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
