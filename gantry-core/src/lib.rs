//! # Gantry Core
//!
//! Lifecycle primitives for Gantry facilities.
//!
//! A *facility* is a configurable component providing a narrow service
//! (an HTTP client, a cache, a queue) to a larger application. Facilities
//! implement the [`Facility`] trait and are driven by a
//! [`FacilityRegistry`], which starts them in registration order and
//! stops them in reverse.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use gantry_core::{Facility, FacilityRegistry, FacilityResult};
//!
//! struct CacheFacility;
//!
//! #[async_trait]
//! impl Facility for CacheFacility {
//!     fn name(&self) -> &str {
//!         "cache"
//!     }
//!
//!     async fn start(&self) -> FacilityResult {
//!         Ok(())
//!     }
//!
//!     async fn stop(&self) -> FacilityResult {
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() {
//! let registry = FacilityRegistry::new();
//! registry.register(Arc::new(CacheFacility)).await;
//! registry.start_all().await.unwrap();
//! // ... serve ...
//! registry.stop_all().await.unwrap();
//! # }
//! ```

mod lifecycle;

pub use lifecycle::{Facility, FacilityErrors, FacilityRegistry, FacilityResult};
