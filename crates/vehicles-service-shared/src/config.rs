//! Service configuration read from the environment at startup.
//!
//! - `VEHICLES_DATA_PATH` - Path to the vehicle seed JSON (default: `/data/vehicles.json`)
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default location of the vehicle seed file inside the container.
pub const DEFAULT_DATA_PATH: &str = "/data/vehicles.json";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Startup configuration for the vehicles service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// JSON file the vehicle store is seeded from.
    pub data_path: PathBuf,
    /// Port the HTTP listener binds to on all interfaces.
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("VEHICLES_DATA_PATH").ok(),
            std::env::var("SERVICE_PORT").ok(),
        )
    }

    /// Build configuration from raw variable values.
    ///
    /// An unparsable port falls back to [`DEFAULT_PORT`].
    pub fn from_vars(data_path: Option<String>, port: Option<String>) -> Self {
        let data_path = data_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let port = port
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { data_path, port }
    }
}
