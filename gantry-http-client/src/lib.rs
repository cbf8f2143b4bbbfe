//! # Gantry HTTP Client
//!
//! An HTTP client facility that standardizes outbound requests within a
//! larger service: fixed base URL, default timeout, default query
//! parameters, encoding negotiation, and transport errors normalized into
//! a single domain error type.
//!
//! ## Features
//!
//! - **Base URL**: relative paths are resolved against a configured base;
//!   absolute URLs bypass it
//! - **Query layering**: URL-native query, configured defaults, and
//!   per-call parameters merged in order
//! - **Encoding negotiation**: `text`, `json`, `raw` (unbuffered), or
//!   binary bodies, selectable per side
//! - **Domain errors**: non-2xx responses carry status, status text,
//!   headers, and the decoded body when available
//! - **Lifecycle**: [`HttpFacility`] implements the `gantry-core`
//!   facility contract (`start` builds the client, `stop` clears it)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gantry_http_client::{HttpClient, HttpClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(
//!         HttpClientConfig::builder()
//!             .base_url("https://api.example.com")
//!             .build(),
//!     );
//!
//!     let response = client.get("/users").send().await?;
//!     println!("body: {:?}", response.body());
//!     Ok(())
//! }
//! ```
//!
//! ## As a Facility
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gantry_core::FacilityRegistry;
//! use gantry_http_client::{Encoding, HttpClientConfig, HttpFacility};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let facility = Arc::new(HttpFacility::new(
//!         HttpClientConfig::builder()
//!             .base_url("https://api.example.com")
//!             .default_query("token", "abc")
//!             .build(),
//!     ));
//!
//!     let registry = FacilityRegistry::new();
//!     registry.register(facility.clone()).await;
//!     registry.start_all().await.map_err(|_| "start failed")?;
//!
//!     let client = facility.client()?;
//!     let users = client.get("/users").encoding(Encoding::Json).send().await?;
//!     println!("{:?}", users.body().as_json());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod encoding;
mod error;
mod facility;
mod request;
mod response;

pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use encoding::{Encoding, EncodingSpec};
pub use error::{HttpClientError, Result};
pub use facility::HttpFacility;
pub use request::RequestBuilder;
pub use response::{Response, ResponseBody};

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use gantry_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder};
    pub use crate::encoding::{Encoding, EncodingSpec};
    pub use crate::error::{HttpClientError, Result};
    pub use crate::facility::HttpFacility;
    pub use crate::request::RequestBuilder;
    pub use crate::response::{Response, ResponseBody};
    pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
}
