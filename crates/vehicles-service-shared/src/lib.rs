//! Shared HTTP infrastructure for the vehicles query microservice.
//!
//! - [`AppState`]: The query service over the pre-loaded vehicle store
//! - [`router`]: All vehicle, health and metrics routes
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ErrorResponse`]: `{"status","message"}` error envelope
//! - [`ServiceResponse`]: `{"message","data"}` success envelope
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Request parameter types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay transport-only; every query rule lives in `vehicles-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse path / query parameters (400 on malformed input)   │
//! │  - Call VehicleService                                      │
//! │  - Map NoVehicles to 404, other errors to 500               │
//! │  - Render JSON envelope                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fixture-backed state and a stub
//! service. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod error;
mod handlers;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use error::{from_lib_error, ErrorResponse, MESSAGE_INTERNAL_ERROR, MESSAGE_VEHICLES_NOT_FOUND};
pub use handlers::{router, router_with_metrics_path};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_vehicle_query, record_vehicles_returned, MetricsConfig,
    MetricsError, DEFAULT_METRICS_PATH,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use request::{
    BrandParams, BrandYearRangeParams, BrandYearRangeQuery, ColorYearParams, ColorYearQuery,
    ParamError, Validate, WeightParams,
};
pub use response::{ApiResponse, ServiceResponse};
pub use state::{AppState, AppStateError};
