//! Client configuration.
//!
//! The page ships with sensible defaults; a deployment may override them by
//! embedding a JSON document that is parsed with [`ClientConfig::from_json`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Default base path of the backend API, relative to the page origin.
pub const DEFAULT_API_BASE_URL: &str = "/api";

/// Default storage slot holding the pending export.
pub const DEFAULT_STORAGE_KEY: &str = "pendingPlaylist";

/// Client-side configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend API. May be relative to the page origin.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Storage key of the pending export slot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_key: default_storage_key(),
        }
    }
}

impl ClientConfig {
    /// Parse configuration overrides from JSON. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("Failed to parse client config: {e}")))?;
        config.validate()?;
        debug!(api_base_url = %config.api_base_url, "Loaded client config");
        Ok(config)
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Configuration(
                "api_base_url cannot be empty".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(Error::Configuration(
                "storage_key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the API base against the page origin.
    ///
    /// The returned URL always ends with `/` so endpoint names can be joined
    /// onto it without dropping the last path segment.
    pub fn resolve_api_base(&self, origin: &str) -> Result<Url> {
        let base = match Url::parse(&self.api_base_url) {
            Ok(absolute) => absolute,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(origin)?.join(&self.api_base_url)?
            }
            Err(e) => return Err(e.into()),
        };
        Ok(with_trailing_slash(base))
    }
}

/// Ensure the URL path ends with `/`.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
