//! The HTTP client as a lifecycle-managed facility.

use async_trait::async_trait;
use gantry_core::{Facility, FacilityResult};
use parking_lot::RwLock;

use crate::client::HttpClient;
use crate::config::HttpClientConfig;
use crate::error::{HttpClientError, Result};

/// Lifecycle wrapper around [`HttpClient`].
///
/// Holds the raw configuration; `start` derives the active client from
/// it (base-URL normalization, default-query encoding, transport
/// construction) and `stop` clears it. Between `stop` and the next
/// `start`, [`HttpFacility::client`] returns
/// [`HttpClientError::NotStarted`].
pub struct HttpFacility {
    config: HttpClientConfig,
    active: RwLock<Option<HttpClient>>,
}

impl HttpFacility {
    /// Create the facility with the given configuration. No transport
    /// state exists until `start`.
    pub fn new(config: HttpClientConfig) -> Self {
        Self {
            config,
            active: RwLock::new(None),
        }
    }

    /// Hand out the active client, a cheap clone over shared state.
    pub fn client(&self) -> Result<HttpClient> {
        self.active.read().clone().ok_or(HttpClientError::NotStarted)
    }

    /// Whether the facility is currently started.
    pub fn is_started(&self) -> bool {
        self.active.read().is_some()
    }
}

#[async_trait]
impl Facility for HttpFacility {
    fn name(&self) -> &str {
        "http"
    }

    async fn start(&self) -> FacilityResult {
        *self.active.write() = Some(HttpClient::new(self.config.clone()));
        Ok(())
    }

    async fn stop(&self) -> FacilityResult {
        *self.active.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn client_is_unavailable_until_started() {
        let facility = HttpFacility::new(
            HttpClientConfig::builder()
                .base_url("https://api.example.com")
                .build(),
        );

        assert!(!facility.is_started());
        assert!(matches!(
            facility.client(),
            Err(HttpClientError::NotStarted)
        ));

        facility.start().await.unwrap();
        assert!(facility.is_started());
        let client = facility.client().unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");

        facility.stop().await.unwrap();
        assert!(!facility.is_started());
        assert!(matches!(
            facility.client(),
            Err(HttpClientError::NotStarted)
        ));
    }
}
