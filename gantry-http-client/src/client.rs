//! HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use http::Method;
use tracing::debug;

use crate::config::HttpClientConfig;
use crate::error::Result;
use crate::request::RequestBuilder;

/// The active (started) client state, shared by every request.
#[derive(Debug)]
struct ClientState {
    base_url: String,
    default_query: String,
    timeout: Duration,
    debug: bool,
}

/// HTTP client with base URL, default query, and encoding support.
///
/// Cheap to clone: the configuration is `Arc`ed and `reqwest::Client`
/// is itself a handle. Each call is an independent pipeline over this
/// shared immutable state; concurrent calls need no coordination.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Transport that does not follow redirects (the default policy).
    manual: reqwest::Client,
    /// Transport that follows redirects, for requests that opt in.
    following: reqwest::Client,
    state: Arc<ClientState>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    ///
    /// Normalization happens here, once: the base URL loses its trailing
    /// slash and the default query parameters are form-encoded into a
    /// single string. Redirect handling is client-level in the
    /// transport, so both policies are built up front and picked per
    /// request.
    pub fn new(config: HttpClientConfig) -> Self {
        let base_url = config
            .base_url
            .as_deref()
            .map(|u| u.strip_suffix('/').unwrap_or(u).to_string())
            .unwrap_or_default();

        let default_query = if config.default_query.is_empty() {
            String::new()
        } else {
            serde_urlencoded::to_string(&config.default_query)
                .expect("string pairs always form-encode")
        };

        let build = |redirect: reqwest::redirect::Policy| {
            let mut builder = reqwest::Client::builder()
                .user_agent(&config.user_agent)
                .redirect(redirect);
            if config.gzip {
                builder = builder.gzip(true);
            }
            if config.brotli {
                builder = builder.brotli(true);
            }
            if !config.timeout.is_zero() {
                builder = builder.timeout(config.timeout);
            }
            builder.build().expect("failed to build HTTP client")
        };

        Self {
            manual: build(reqwest::redirect::Policy::none()),
            following: build(reqwest::redirect::Policy::limited(10)),
            state: Arc::new(ClientState {
                base_url,
                default_query,
                timeout: config.timeout,
                debug: config.debug,
            }),
        }
    }

    /// Create a GET request builder.
    pub fn get(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, path.into())
    }

    /// Create a POST request builder.
    pub fn post(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::POST, path.into())
    }

    /// Create a PUT request builder.
    pub fn put(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PUT, path.into())
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PATCH, path.into())
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::DELETE, path.into())
    }

    /// Create a HEAD request builder. The response body is never decoded.
    pub fn head(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::HEAD, path.into())
    }

    /// Create an OPTIONS request builder. The response body is never
    /// decoded.
    pub fn options(&self, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::OPTIONS, path.into())
    }

    /// Create a request builder with a custom method.
    pub fn request(&self, method: Method, path: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, method, path.into())
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.state.base_url
    }

    pub(crate) fn default_query(&self) -> &str {
        &self.state.default_query
    }

    pub(crate) fn default_timeout(&self) -> Duration {
        self.state.timeout
    }

    pub(crate) fn debug(&self) -> bool {
        self.state.debug
    }

    /// The transport for the given redirect gate: `true` follows
    /// redirects, anything else leaves them manual.
    pub(crate) fn transport(&self, redirect: bool) -> &reqwest::Client {
        if redirect { &self.following } else { &self.manual }
    }

    /// Perform the single transport exchange.
    pub(crate) async fn execute(
        &self,
        redirect: bool,
        request: reqwest::Request,
    ) -> Result<reqwest::Response> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        Ok(self.transport(redirect).execute(request).await?)
    }
}
