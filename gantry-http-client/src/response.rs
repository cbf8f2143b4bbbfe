//! Response wrapper and normalization.

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::encoding::Encoding;
use crate::error::{HttpClientError, Result};

/// A normalized, completed HTTP exchange: decoded body plus headers.
#[derive(Debug)]
pub struct Response {
    pub(crate) body: ResponseBody,
    pub(crate) headers: HeaderMap,
}

impl Response {
    /// The decoded body.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Consume the response and return the decoded body.
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Deserialize the buffered body into `T`.
    ///
    /// Works for `Json`, `Text`, and `Bytes` bodies; `None` and `Raw`
    /// bodies have nothing buffered to deserialize.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        self.body.json()
    }
}

/// The decoded response body, per the negotiated response encoding.
#[derive(Debug)]
pub enum ResponseBody {
    /// No body: HEAD/OPTIONS requests, or decoding was skipped.
    None,
    /// UTF-8 text.
    Text(String),
    /// Parsed JSON value.
    Json(serde_json::Value),
    /// Buffered raw bytes.
    Bytes(Bytes),
    /// The live transport response, unbuffered. Stream it with
    /// `reqwest::Response::bytes_stream`.
    Raw(reqwest::Response),
}

impl ResponseBody {
    /// True when no body was decoded.
    pub fn is_none(&self) -> bool {
        matches!(self, ResponseBody::None)
    }

    /// Borrow the body as text, if it was decoded as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the body as a JSON value, if it was decoded as JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the body as raw bytes, if it was buffered as bytes.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ResponseBody::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Take the live transport response out of a `Raw` body.
    pub fn into_raw(self) -> Option<reqwest::Response> {
        match self {
            ResponseBody::Raw(resp) => Some(resp),
            _ => None,
        }
    }

    /// Deserialize the buffered body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            ResponseBody::Json(v) => {
                serde_json::from_value(v.clone()).map_err(|e| HttpClientError::Json(e.to_string()))
            }
            ResponseBody::Text(s) => {
                serde_json::from_str(s).map_err(|e| HttpClientError::Json(e.to_string()))
            }
            ResponseBody::Bytes(b) => {
                serde_json::from_slice(b).map_err(|e| HttpClientError::Json(e.to_string()))
            }
            ResponseBody::None | ResponseBody::Raw(_) => Err(HttpClientError::Json(
                "no buffered body to deserialize".to_string(),
            )),
        }
    }
}

/// Normalize a raw transport response into a [`Response`] or an error.
///
/// Headers are captured first so every failure path can carry them.
/// Non-2xx statuses classify a [`HttpClientError::Status`]; the body is
/// still decoded (except for HEAD/OPTIONS) and, when decoding succeeds,
/// attached to the status error as auxiliary context. A decode failure
/// is the returned error only when no status error exists; otherwise it
/// is swallowed, since the status error is the more actionable signal.
pub(crate) async fn normalize(
    resp: reqwest::Response,
    res_encoding: Encoding,
    method: &Method,
    debug_enabled: bool,
) -> Result<Response> {
    let status = resp.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    let headers = resp.headers().clone();
    let failed = !status.is_success();

    let mut body = ResponseBody::None;
    if *method != Method::HEAD && *method != Method::OPTIONS {
        match decode_body(resp, res_encoding, &headers).await {
            Ok(decoded) => body = decoded,
            Err(err) => {
                if !failed {
                    return Err(err);
                }
                if debug_enabled {
                    debug!(error = %err, "body decode failed after HTTP error; keeping the status error");
                }
            }
        }
    }

    if failed {
        return Err(HttpClientError::Status {
            status,
            status_text,
            headers,
            body: (!body.is_none()).then_some(body),
        });
    }

    Ok(Response { body, headers })
}

async fn decode_body(
    resp: reqwest::Response,
    encoding: Encoding,
    headers: &HeaderMap,
) -> Result<ResponseBody> {
    let decode_err = |message: String| HttpClientError::Decode {
        encoding,
        message,
        headers: headers.clone(),
    };

    match encoding {
        Encoding::Raw => Ok(ResponseBody::Raw(resp)),
        Encoding::Text => {
            let bytes = resp.bytes().await.map_err(|e| decode_err(e.to_string()))?;
            let text =
                String::from_utf8(bytes.to_vec()).map_err(|e| decode_err(e.to_string()))?;
            Ok(ResponseBody::Text(text))
        }
        Encoding::Json => {
            let bytes = resp.bytes().await.map_err(|e| decode_err(e.to_string()))?;
            let value =
                serde_json::from_slice(&bytes).map_err(|e| decode_err(e.to_string()))?;
            Ok(ResponseBody::Json(value))
        }
        Encoding::Binary => {
            let bytes = resp.bytes().await.map_err(|e| decode_err(e.to_string()))?;
            Ok(ResponseBody::Bytes(bytes))
        }
    }
}
