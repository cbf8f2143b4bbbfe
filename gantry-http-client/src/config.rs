//! HTTP client facility configuration.

use std::time::Duration;

/// HTTP client configuration.
///
/// This is the raw, caller-supplied shape. Normalization (trailing-slash
/// stripping, default-query encoding) happens once when the active
/// [`crate::HttpClient`] is built from it.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL resolved against relative request paths.
    pub base_url: Option<String>,
    /// Default request timeout. `Duration::ZERO` leaves the transport's
    /// platform default in place (no client-level timeout).
    pub timeout: Duration,
    /// Emit extra diagnostics for suppressed decode failures.
    pub debug: bool,
    /// Default query parameters appended to every request.
    pub default_query: Vec<(String, String)>,
    /// User agent string.
    pub user_agent: String,
    /// Enable gzip decompression.
    pub gzip: bool,
    /// Enable brotli decompression.
    pub brotli: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::ZERO,
            debug: false,
            default_query: Vec::new(),
            user_agent: format!("gantry-http-client/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
            brotli: true,
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client configuration.
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL for relative request paths.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout. `Duration::ZERO` means unbounded.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enable or disable debug diagnostics.
    pub fn debug(mut self, enable: bool) -> Self {
        self.config.debug = enable;
        self
    }

    /// Add a default query parameter appended to every request.
    pub fn default_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_query.push((key.into(), value.into()));
        self
    }

    /// Add multiple default query parameters.
    pub fn default_queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.config.default_query.push((k.into(), v.into()));
        }
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable gzip decompression.
    pub fn gzip(mut self, enable: bool) -> Self {
        self.config.gzip = enable;
        self
    }

    /// Enable or disable brotli decompression.
    pub fn brotli(mut self, enable: bool) -> Self {
        self.config.brotli = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HttpClientConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.timeout.is_zero());
        assert!(!config.debug);
        assert!(config.default_query.is_empty());
        assert!(config.gzip);
        assert!(config.brotli);
    }

    #[test]
    fn builder_collects_query_pairs() {
        let config = HttpClientConfig::builder()
            .base_url("https://api.example.com/")
            .timeout(Duration::from_secs(5))
            .default_query("token", "abc")
            .default_queries([("page", "1"), ("limit", "50")])
            .build();

        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com/"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.default_query,
            vec![
                ("token".to_string(), "abc".to_string()),
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }
}
