//! Facility lifecycle: the [`Facility`] trait and [`FacilityRegistry`].
//!
//! A facility exposes paired `start`/`stop` hooks. The registry owns the
//! ordering contract: `start_all` runs hooks in registration order,
//! `stop_all` in reverse (LIFO), so facilities may depend on earlier ones
//! being alive for their whole lifetime.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Result type for facility lifecycle hooks.
pub type FacilityResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Per-facility failures collected by a registry sweep, keyed by name.
pub type FacilityErrors = Vec<(String, Box<dyn std::error::Error + Send + Sync>)>;

/// A lifecycle-managed component providing a narrow service to a larger
/// application.
#[async_trait]
pub trait Facility: Send + Sync {
    /// Short identifier used in logs and error reports.
    fn name(&self) -> &str;

    /// Derive the facility's active state from its configuration.
    async fn start(&self) -> FacilityResult;

    /// Release the facility's active state.
    async fn stop(&self) -> FacilityResult;
}

/// Registry of facilities, started in order and stopped in reverse.
pub struct FacilityRegistry {
    facilities: RwLock<Vec<Arc<dyn Facility>>>,
}

impl FacilityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            facilities: RwLock::new(Vec::new()),
        }
    }

    /// Register a facility. Registration order is start order.
    pub async fn register(&self, facility: Arc<dyn Facility>) {
        let mut facilities = self.facilities.write().await;
        facilities.push(facility);
    }

    /// Number of registered facilities.
    pub async fn count(&self) -> usize {
        self.facilities.read().await.len()
    }

    /// Start every facility in registration order.
    ///
    /// All facilities are attempted even if an earlier one fails; failures
    /// are collected and returned together.
    pub async fn start_all(&self) -> Result<(), FacilityErrors> {
        let facilities = self.facilities.read().await;
        let mut errors = FacilityErrors::new();

        for facility in facilities.iter() {
            match facility.start().await {
                Ok(()) => {
                    debug!(facility = facility.name(), "facility started");
                }
                Err(e) => {
                    error!(facility = facility.name(), error = %e, "facility failed to start");
                    errors.push((facility.name().to_string(), e));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Stop every facility in reverse registration order (LIFO).
    pub async fn stop_all(&self) -> Result<(), FacilityErrors> {
        let facilities = self.facilities.read().await;
        let mut errors = FacilityErrors::new();

        for facility in facilities.iter().rev() {
            match facility.stop().await {
                Ok(()) => {
                    debug!(facility = facility.name(), "facility stopped");
                }
                Err(e) => {
                    error!(facility = facility.name(), error = %e, "facility failed to stop");
                    errors.push((facility.name().to_string(), e));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Drop all registered facilities without stopping them.
    pub async fn clear(&self) {
        self.facilities.write().await.clear();
    }
}

impl Default for FacilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
