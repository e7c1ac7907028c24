//! Client configuration.
//!
//! Loaded from a TOML file (typically `~/.linkhub/config.toml`):
//!
//! ```toml
//! link_id = "TESTER"
//! secret_key = "bGlua2h1Yi10ZXN0LXNlY3JldC1rZXk="
//! service_url = "https://auth.linkhub.co.kr"
//! timeout_secs = 10
//! forwarded_ip = "203.0.113.7"
//! ```

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{LinkhubError, LinkhubResult};

/// Production authority endpoint.
pub const DEFAULT_SERVICE_URL: &str = "https://auth.linkhub.co.kr";

/// Environment variable overriding `link_id`.
pub const ENV_LINK_ID: &str = "LINKHUB_LINK_ID";
/// Environment variable overriding `secret_key`.
pub const ENV_SECRET_KEY: &str = "LINKHUB_SECRET_KEY";

/// Credentials and endpoint settings of an authority client.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorityConfig {
    /// Partner link id.
    #[serde(default)]
    pub link_id: String,

    /// Base64 secret key paired with the link id.
    #[serde(default)]
    pub secret_key: String,

    /// Base URL of the authority service, without trailing slash.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client address to attest when calls are proxied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarded_ip: Option<String>,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            link_id: String::new(),
            secret_key: String::new(),
            service_url: default_service_url(),
            timeout_secs: default_timeout_secs(),
            forwarded_ip: None,
        }
    }
}

impl std::fmt::Debug for AuthorityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorityConfig")
            .field("link_id", &self.link_id)
            .field("secret_key", &"<redacted>")
            .field("service_url", &self.service_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("forwarded_ip", &self.forwarded_ip)
            .finish()
    }
}

impl AuthorityConfig {
    /// Load configuration from a TOML file. If the file does not exist,
    /// returns a default configuration.
    ///
    /// The result is not validated; credentials may still arrive through
    /// [`apply_overrides`](Self::apply_overrides).
    pub fn load(path: &Path) -> LinkhubResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LinkhubError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> LinkhubResult<Self> {
        toml::from_str(contents).map_err(|e| LinkhubError::config(format!("TOML parse error: {}", e)))
    }

    /// Replace credentials with values from `lookup` (normally the process
    /// environment). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(link_id) = lookup(ENV_LINK_ID).filter(|v| !v.is_empty()) {
            self.link_id = link_id;
        }
        if let Some(secret_key) = lookup(ENV_SECRET_KEY).filter(|v| !v.is_empty()) {
            self.secret_key = secret_key;
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> LinkhubResult<()> {
        if self.link_id.is_empty() {
            return Err(LinkhubError::config("link_id must not be empty"));
        }
        if self.secret_key.is_empty() {
            return Err(LinkhubError::config("secret_key must not be empty"));
        }
        if BASE64.decode(&self.secret_key).is_err() {
            return Err(LinkhubError::config("secret_key must be valid base64"));
        }
        if !(self.service_url.starts_with("https://") || self.service_url.starts_with("http://")) {
            return Err(LinkhubError::config(format!(
                "service_url must be an http(s) URL, got '{}'",
                self.service_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(LinkhubError::config("timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Return the path to the default config file location.
    pub fn default_config_path() -> PathBuf {
        std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".linkhub/config.toml"))
            .unwrap_or_else(|_| PathBuf::from(".linkhub/config.toml"))
    }
}
