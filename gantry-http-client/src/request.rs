//! Request builder: URL assembly, option defaulting, and completion.

use std::time::Duration;

use base64::Engine;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use url::Url;

use crate::client::HttpClient;
use crate::encoding::{Encoding, EncodingSpec};
use crate::error::{HttpClientError, Result};
use crate::response::{Response, normalize};

/// Body staged on the builder before request encoding is applied.
#[derive(Debug)]
enum RequestBody {
    Bytes(Vec<u8>),
    Text(String),
    Json(serde_json::Value),
}

/// HTTP request builder.
///
/// Produced by the verb methods on [`HttpClient`]. Only the recognized
/// request knobs exist as methods; completion is either the suspending
/// [`RequestBuilder::send`] or the callback-style
/// [`RequestBuilder::send_with`].
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    path: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    encoding: EncodingSpec,
    auth: Option<(String, String)>,
    timeout: Option<Duration>,
    redirect: bool,
}

impl<'a> RequestBuilder<'a> {
    /// Create a new request builder.
    pub(crate) fn new(client: &'a HttpClient, method: Method, path: String) -> Self {
        Self {
            client,
            method,
            path,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            encoding: EncodingSpec::default(),
            auth: None,
            timeout: None,
            redirect: false,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add multiple query parameters.
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.query.push((k.into(), v.into()));
        }
        self
    }

    /// Set the request body as raw bytes. Passed through unchanged unless
    /// the request encoding is `Json`, in which case pre-encoded bytes
    /// are still forwarded as-is.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    /// Set the request body as text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.body = Some(RequestBody::Text(text.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        match serde_json::to_value(json) {
            Ok(value) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                self.body = Some(RequestBody::Json(value));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize JSON body");
            }
        }
        self
    }

    /// Set the request/response encoding. A bare [`Encoding`] applies to
    /// both sides; pass an [`EncodingSpec`] or `(req, res)` pair to set
    /// them independently.
    pub fn encoding(mut self, encoding: impl Into<EncodingSpec>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set basic authentication. Injected at send time, overriding any
    /// caller-supplied `authorization` header.
    pub fn basic_auth(
        mut self,
        username: impl Into<String>,
        password: Option<impl Into<String>>,
    ) -> Self {
        self.auth = Some((
            username.into(),
            password.map(Into::into).unwrap_or_default(),
        ));
        self
    }

    /// Set a custom timeout for this request. `Duration::ZERO` falls back
    /// to the configured default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Follow redirects for this request. The default is manual: the
    /// redirect response itself is returned (and classified as a status
    /// error). This is an on/off gate, not a redirect-mode selector.
    pub fn redirect(mut self, follow: bool) -> Self {
        self.redirect = follow;
        self
    }

    /// Assemble the request URL.
    ///
    /// A path containing a scheme separator is absolute and used
    /// verbatim. Otherwise the configured base URL and the path are
    /// joined with exactly one slash. Query layers are appended in
    /// order (the URL's own query, the configured default query, then
    /// per-call parameters) with `?` before the first segment and `&`
    /// before each subsequent one.
    fn build_url(&self) -> Result<Url> {
        let mut url = if self.path.contains("://") {
            self.path.clone()
        } else {
            let rel = self.path.strip_prefix('/').unwrap_or(&self.path);
            format!("{}/{}", self.client.base_url(), rel)
        };

        let mut has_query = url.contains('?');
        let default_query = self.client.default_query();
        if !default_query.is_empty() {
            url.push(if has_query { '&' } else { '?' });
            url.push_str(default_query);
            has_query = true;
        }
        if !self.query.is_empty() {
            let encoded = serde_urlencoded::to_string(&self.query)
                .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
            url.push(if has_query { '&' } else { '?' });
            url.push_str(&encoded);
        }

        Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))
    }

    /// Apply the headers derived from other options: `content-type` for
    /// JSON request encoding and the basic-auth `authorization` header,
    /// which overrides any caller-supplied value.
    fn finalize_headers(&mut self) {
        if self.encoding.req == Encoding::Json {
            self.headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        if let Some((username, password)) = &self.auth {
            let credentials =
                base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
            self.headers.insert(
                http::header::AUTHORIZATION,
                HeaderValue::try_from(format!("Basic {credentials}"))
                    .expect("base64 credentials always form a valid header value"),
            );
        }
    }

    /// Encode the staged body per the request encoding.
    fn encode_body(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(body) = self.body.take() else {
            return Ok(None);
        };

        let json_err = |e: serde_json::Error| HttpClientError::Json(e.to_string());
        let bytes = match (self.encoding.req, body) {
            // Pre-encoded bytes are forwarded as-is even under Json.
            (_, RequestBody::Bytes(raw)) => raw,
            (Encoding::Json, RequestBody::Text(s)) => serde_json::to_vec(&s).map_err(json_err)?,
            (_, RequestBody::Text(s)) => s.into_bytes(),
            (_, RequestBody::Json(v)) => serde_json::to_vec(&v).map_err(json_err)?,
        };
        Ok(Some(bytes))
    }

    /// Send the request and suspend until the exchange completes.
    ///
    /// Every failure converges here as an [`HttpClientError`]; nothing
    /// escapes the call as a panic. Dropping the returned future aborts
    /// the in-flight request.
    pub async fn send(mut self) -> Result<Response> {
        let url = self.build_url()?;
        self.finalize_headers();
        let body = self.encode_body()?;

        let Self {
            client,
            method,
            headers,
            encoding,
            timeout,
            redirect,
            ..
        } = self;

        let mut request = client
            .transport(redirect)
            .request(method.clone(), url)
            .headers(headers);
        if let Some(bytes) = body {
            request = request.body(bytes);
        }
        if let Some(timeout) = timeout
            && !timeout.is_zero()
        {
            request = request.timeout(timeout);
        }

        let response = client.execute(redirect, request.build()?).await?;
        normalize(response, encoding.res, &method, client.debug()).await
    }

    /// Send the request and deliver the outcome to `on_complete`.
    ///
    /// The callback is invoked exactly once with the same result
    /// [`RequestBuilder::send`] would return; the call itself yields
    /// nothing.
    pub async fn send_with<F>(self, on_complete: F)
    where
        F: FnOnce(Result<Response>),
    {
        on_complete(self.send().await);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpClientConfig;

    fn client_with(base_url: Option<&str>, default_query: &[(&str, &str)]) -> HttpClient {
        let mut builder = HttpClientConfig::builder();
        if let Some(base) = base_url {
            builder = builder.base_url(base);
        }
        for (k, v) in default_query {
            builder = builder.default_query(*k, *v);
        }
        HttpClient::new(builder.build())
    }

    #[test]
    fn relative_paths_join_base_with_exactly_one_slash() {
        for base in ["https://api.example.com", "https://api.example.com/"] {
            for path in ["users", "/users"] {
                let client = client_with(Some(base), &[]);
                let url = client.get(path).build_url().unwrap();
                assert_eq!(url.as_str(), "https://api.example.com/users");
            }
        }
    }

    #[test]
    fn absolute_paths_bypass_the_base_url() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let url = client
            .get("https://other.example.org/status?probe=1")
            .build_url()
            .unwrap();
        assert_eq!(url.as_str(), "https://other.example.org/status?probe=1");
    }

    #[test]
    fn query_layers_merge_in_order() {
        let client = client_with(Some("https://api.example.com"), &[("token", "abc")]);
        let url = client
            .get("/search?q=rust")
            .query("page", "2")
            .build_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/search?q=rust&token=abc&page=2"
        );
    }

    #[test]
    fn default_query_alone_uses_question_mark() {
        let client = client_with(Some("https://api.example.com"), &[("token", "abc")]);
        let url = client.get("/users").build_url().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users?token=abc");
    }

    #[test]
    fn per_call_query_is_form_encoded() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let url = client
            .get("/search")
            .query("q", "hello world")
            .build_url()
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/search?q=hello+world");
    }

    #[test]
    fn missing_base_url_with_relative_path_is_invalid() {
        let client = client_with(None, &[]);
        let err = client.get("/users").build_url().unwrap_err();
        assert!(matches!(err, HttpClientError::InvalidUrl(_)));
    }

    #[test]
    fn basic_auth_overrides_caller_authorization() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let mut builder = client
            .get("/secure")
            .header("authorization", "Bearer nope")
            .basic_auth("u", Some("p"));
        builder.finalize_headers();

        assert_eq!(
            builder.headers.get(http::header::AUTHORIZATION).unwrap(),
            &"Basic dTpw"
        );
    }

    #[test]
    fn json_request_encoding_sets_content_type() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let mut builder = client.post("/things").encoding(Encoding::Json);
        builder.finalize_headers();

        assert_eq!(
            builder.headers.get(http::header::CONTENT_TYPE).unwrap(),
            &"application/json"
        );
    }

    #[test]
    fn json_encoding_serializes_text_bodies() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let mut builder = client.post("/things").encoding(Encoding::Json).text("hi");
        let bytes = builder.encode_body().unwrap().unwrap();
        assert_eq!(bytes, b"\"hi\"");
    }

    #[test]
    fn json_bodies_serialize_structured_values() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let mut builder = client
            .post("/things")
            .json(&serde_json::json!({"item": "widget", "quantity": 5}));
        let bytes = builder.encode_body().unwrap().unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&bytes).unwrap(),
            serde_json::json!({"item": "widget", "quantity": 5})
        );
    }

    #[test]
    fn text_bodies_pass_through_without_json_encoding() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let mut builder = client.post("/things").text("hi");
        let bytes = builder.encode_body().unwrap().unwrap();
        assert_eq!(bytes, b"hi");
    }

    #[test]
    fn byte_bodies_are_never_reencoded() {
        let client = client_with(Some("https://api.example.com"), &[]);
        let mut builder = client
            .post("/things")
            .encoding(Encoding::Json)
            .body(b"{\"already\":\"encoded\"}".to_vec());
        let bytes = builder.encode_body().unwrap().unwrap();
        assert_eq!(bytes, b"{\"already\":\"encoded\"}");
    }
}
