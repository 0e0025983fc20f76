//! NNTP server configuration

use std::time::Duration;

/// NNTP server configuration
///
/// Contains all the information needed to connect to an NNTP server.
///
/// # Example
///
/// ```
/// use nntp_engine::ServerConfig;
/// use std::time::Duration;
///
/// let config = ServerConfig::plain("news.example.com")
///     .with_response_timeout(Duration::from_secs(60));
/// assert_eq!(config.port, 119);
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    /// Server hostname (e.g., "news.example.com")
    pub host: String,

    /// Server port (typically 119 for plain, 563 for TLS)
    pub port: u16,

    /// Use TLS/SSL encryption
    #[cfg_attr(feature = "serde", serde(default = "default_tls"))]
    pub tls: bool,

    /// Allow insecure TLS connections (self-signed certificates, expired certificates)
    ///
    /// **Security Warning:** Setting this to `true` disables certificate validation,
    /// making your connection vulnerable to man-in-the-middle attacks. Only use this
    /// for testing or with servers you trust on a secure network.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_insecure_tls: bool,

    /// How long an outstanding command may wait for its response before the
    /// connection is treated as failed. `None` waits forever.
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "duration_secs", skip_serializing_if = "Option::is_none")
    )]
    pub response_timeout: Option<Duration>,
}

#[cfg(feature = "serde")]
fn default_tls() -> bool {
    true
}

#[cfg(feature = "serde")]
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}

impl ServerConfig {
    /// Create a new server configuration
    ///
    /// # Arguments
    ///
    /// * `host` - Server hostname
    /// * `port` - Server port
    /// * `tls` - Whether to use TLS/SSL
    pub fn new(host: impl Into<String>, port: u16, tls: bool) -> Self {
        Self {
            host: host.into(),
            port,
            tls,
            allow_insecure_tls: false,
            response_timeout: None,
        }
    }

    /// Create a configuration for a plain connection on the standard port (119)
    pub fn plain(host: impl Into<String>) -> Self {
        Self::new(host, 119, false)
    }

    /// Create a configuration for a TLS connection on the standard secure port (563)
    pub fn tls(host: impl Into<String>) -> Self {
        Self::new(host, 563, true)
    }

    /// Create a TLS configuration that accepts self-signed certificates
    ///
    /// **Security Warning:** This configuration disables certificate validation.
    pub fn tls_insecure(host: impl Into<String>) -> Self {
        let mut config = Self::tls(host);
        config.allow_insecure_tls = true;
        config
    }

    /// Fail the connection when a response takes longer than `timeout`
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }
}
