use catalog::config::CatalogConfig;
use serde::Deserialize;
use shared::http::ConnectionTimeouts;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("HMAC key cannot be empty")]
    EmptyHmacKey,

    #[error("max_image_size must be at least 1")]
    InvalidMaxImageSize,

    #[error("list limits must satisfy 1 <= default_limit <= max_limit")]
    InvalidListLimits,

    #[error("Timeouts must be non-zero")]
    InvalidTimeout,

    #[error("{0} must be an http(s) URL")]
    InvalidUrl(&'static str),
}

/// Gateway configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Main listener for incoming requests
    pub listener: Listener,
    /// Admin listener for health and readiness probes
    pub admin_listener: Listener,
    /// Public URL of this service, used for `download_url` and `Link` headers
    pub root_url: Url,
    /// Base URL of the image renderer that redirects point to
    pub image_service_url: Url,
    /// Secret shared with the image renderer for signing redirects
    pub hmac_key: HmacKey,
    /// Largest width or height accepted, unless it matches the image's own size
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u32,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub timeouts: Timeouts,
    pub catalog: CatalogConfig,
}

fn default_max_image_size() -> u32 {
    5000
}

impl Config {
    /// Validates the gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;
        self.admin_listener.validate()?;

        for (name, url) in [
            ("root_url", &self.root_url),
            ("image_service_url", &self.image_service_url),
        ] {
            if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
                return Err(ValidationError::InvalidUrl(name));
            }
        }

        if self.hmac_key.0.is_empty() {
            return Err(ValidationError::EmptyHmacKey);
        }

        if self.max_image_size == 0 {
            return Err(ValidationError::InvalidMaxImageSize);
        }

        self.list.validate()?;
        self.timeouts.validate()?;

        Ok(())
    }
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Listener {
    /// Validates the listener configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

/// Signing secret. Never printed.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HmacKey(String);

impl HmacKey {
    pub fn new<K: Into<String>>(key: K) -> Self {
        HmacKey(key.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacKey(<redacted>)")
    }
}

/// Paging limits for `/v2/list`
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            default_limit: 30,
            max_limit: 100,
        }
    }
}

impl ListConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ValidationError::InvalidListLimits);
        }
        Ok(())
    }
}

/// Transport and handler deadlines, in seconds
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Timeouts {
    pub read_secs: u64,
    pub write_secs: u64,
    pub handler_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            read_secs: 30,
            write_secs: 90,
            handler_secs: 45,
        }
    }
}

impl Timeouts {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.read_secs == 0 || self.write_secs == 0 || self.handler_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn connection(&self) -> ConnectionTimeouts {
        ConnectionTimeouts {
            read: Duration::from_secs(self.read_secs),
            write: Duration::from_secs(self.write_secs),
        }
    }

    pub fn handler(&self) -> Duration {
        Duration::from_secs(self.handler_secs)
    }
}
