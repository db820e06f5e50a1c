use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URI: &str = "https://api.integration.app";
pub const DEFAULT_OUTPUT_ROOT: &str = "./dist";
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Connection settings for the remote integration service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Bearer token sent with every request.
    pub token: String,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_uri: &str, token: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(api_uri).map_err(|source| ConfigError::InvalidUri {
            uri: api_uri.to_string(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUri {
                uri: api_uri.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }
        Ok(Self {
            base_url,
            token: token.into(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Settings for one traversal run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Flow files are written below `<output_root>/flows`.
    pub output_root: PathBuf,
    /// Pause before every collection detail fetch.
    pub request_delay: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}
