//! Vehicles query HTTP microservice.
//!
//! Serves read-only queries over a vehicle store seeded from a JSON file at
//! startup.
//!
//! # Endpoints
//!
//! - `GET /vehicles/color/{color}/{year}` - Vehicles of a color built in a year
//! - `GET /vehicles/brand/{brand}/{start_year}/{end_year}` - Vehicles of a brand in a year range
//! - `GET /vehicles/average_speed/brand/{brand}` - Average max speed of a brand
//! - `GET /vehicles/average_capacity/brand/{brand}` - Average passenger capacity of a brand
//! - `GET /vehicles/weight?weight_min=&weight_max=` - Vehicles within a weight range
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `VEHICLES_DATA_PATH` - Path to the vehicle seed JSON (default: /data/vehicles.json)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::net::SocketAddr;

use tracing::{error, info};

use vehicles_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
    router_with_metrics_path,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("vehicles");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional; the API still serves without them.
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        data_path = %config.data_path.display(),
        port = config.port,
        "starting vehicles service"
    );

    let state = AppState::load(&config.data_path).map_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load application state");
        e
    })?;

    info!(
        vehicles = state.vehicles_loaded(),
        "application state loaded"
    );

    let app = router_with_metrics_path(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
