//! HTTP client error types.

use http::{HeaderMap, StatusCode};
use thiserror::Error;

use crate::encoding::Encoding;
use crate::response::ResponseBody;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// HTTP client errors.
///
/// [`HttpClientError::Status`] is the domain error for non-2xx responses
/// and carries the response context (status, status text, headers, and
/// the decoded body when decoding succeeded). The remaining variants are
/// transport, decode, and build failures without HTTP status context.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The server responded with a non-2xx status.
    #[error("ERR_HTTP: {} - {status_text}", status.as_u16())]
    Status {
        /// HTTP status code.
        status: StatusCode,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Response headers.
        headers: HeaderMap,
        /// Decoded response body, when decoding succeeded.
        body: Option<ResponseBody>,
    },

    /// Network-level failure from the transport (connect, timeout, abort).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be read or parsed per the negotiated
    /// encoding.
    #[error("failed to decode response body as {encoding}: {message}")]
    Decode {
        /// The negotiated response encoding.
        encoding: Encoding,
        /// Underlying read/parse error message.
        message: String,
        /// Response headers, still available on decode failure.
        headers: HeaderMap,
    },

    /// The assembled request URL did not parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Request body JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// The facility was used before `start` (or after `stop`).
    #[error("http facility is not started")]
    NotStarted,
}

impl HttpClientError {
    /// HTTP status code, present only for status errors (or transport
    /// errors that captured one).
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Canonical status text for status errors.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Status { status_text, .. } => Some(status_text),
            _ => None,
        }
    }

    /// Response headers, when the failure happened after they were read.
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::Status { headers, .. } | Self::Decode { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// Decoded response body attached to a status error.
    pub fn response_body(&self) -> Option<&ResponseBody> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_format() {
        let err = HttpClientError::Status {
            status: StatusCode::NOT_FOUND,
            status_text: "Not Found".to_string(),
            headers: HeaderMap::new(),
            body: None,
        };
        assert_eq!(err.to_string(), "ERR_HTTP: 404 - Not Found");
        assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.status_text(), Some("Not Found"));
    }

    #[test]
    fn decode_error_keeps_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", "42".parse().unwrap());

        let err = HttpClientError::Decode {
            encoding: Encoding::Json,
            message: "expected value".to_string(),
            headers,
        };
        assert!(err.status_code().is_none());
        assert_eq!(
            err.headers().unwrap().get("x-request-id").unwrap(),
            &"42"
        );
    }

    #[test]
    fn non_status_errors_have_no_status_fields() {
        let err = HttpClientError::InvalidUrl("relative URL without a base".to_string());
        assert!(err.status_code().is_none());
        assert!(err.headers().is_none());
        assert!(err.response_body().is_none());
    }
}
