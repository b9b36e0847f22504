//! Client configuration types and builder.

use std::time::Duration;

/// Default per-request deadline.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
/// Default REST endpoint path on the server node.
const DEFAULT_HTTP_PATH: &str = "/ignite";

/// Configuration error returned when validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for an [`IgniteClient`](crate::IgniteClient).
///
/// Built through [`ClientConfig::builder`]. Address specs are either
/// `host:port` or `host:startPort..endPort`; ranges are expanded into
/// candidate endpoints at connect time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    address_specs: Vec<String>,
    secret_key: Option<String>,
    request_timeout: Duration,
    http_path: String,
}

impl ClientConfig {
    /// Returns a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the configured address specs.
    pub fn address_specs(&self) -> &[String] {
        &self.address_specs
    }

    /// Returns the shared secret used to sign requests, if any.
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    /// Returns the fixed per-request deadline.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the REST endpoint path.
    pub fn http_path(&self) -> &str {
        &self.http_path
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    address_specs: Vec<String>,
    secret_key: Option<String>,
    request_timeout: Option<Duration>,
    http_path: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an address spec (`host:port` or `host:startPort..endPort`).
    pub fn address(mut self, spec: impl Into<String>) -> Self {
        self.address_specs.push(spec.into());
        self
    }

    /// Sets the address specs, replacing any previously configured.
    pub fn addresses<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.address_specs = specs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the shared secret used to sign every request.
    pub fn secret_key(mut self, secret: impl Into<String>) -> Self {
        self.secret_key = Some(secret.into());
        self
    }

    /// Sets the fixed per-request deadline.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the REST endpoint path on the server node.
    pub fn http_path(mut self, path: impl Into<String>) -> Self {
        self.http_path = Some(path.into());
        self
    }

    /// Validates the configuration and builds it.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        if self.address_specs.is_empty() {
            return Err(ConfigError::new("at least one address spec is required"));
        }

        let http_path = self
            .http_path
            .unwrap_or_else(|| DEFAULT_HTTP_PATH.to_string());
        if !http_path.starts_with('/') {
            return Err(ConfigError::new(format!(
                "http path must start with '/': {http_path}"
            )));
        }

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(ConfigError::new("request timeout must be non-zero"));
        }

        Ok(ClientConfig {
            address_specs: self.address_specs,
            secret_key: self.secret_key,
            request_timeout,
            http_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::builder()
            .address("127.0.0.1:8080")
            .build()
            .unwrap();

        assert_eq!(config.address_specs(), ["127.0.0.1:8080"]);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.http_path(), "/ignite");
        assert!(config.secret_key().is_none());
    }

    #[test]
    fn test_requires_an_address() {
        let err = ClientConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("at least one address"));
    }

    #[test]
    fn test_addresses_replaces_previous() {
        let config = ClientConfig::builder()
            .address("a:1")
            .addresses(["b:2", "c:3"])
            .build()
            .unwrap();
        assert_eq!(config.address_specs(), ["b:2", "c:3"]);
    }

    #[test]
    fn test_rejects_relative_http_path() {
        let err = ClientConfig::builder()
            .address("127.0.0.1:8080")
            .http_path("ignite")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = ClientConfig::builder()
            .address("127.0.0.1:8080")
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("non-zero"));
    }

    #[test]
    fn test_secret_key_is_kept() {
        let config = ClientConfig::builder()
            .address("127.0.0.1:8080")
            .secret_key("s3cr3t")
            .build()
            .unwrap();
        assert_eq!(config.secret_key(), Some("s3cr3t"));
    }
}
