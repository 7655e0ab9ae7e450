//! Application state for the HTTP handlers.

use std::path::Path;
use std::sync::Arc;

use vehicles_lib::{
    DefaultVehicleService, Error as LibError, VehicleMapRepository, VehicleService, VehicleStore,
};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Seed file not found.
    DataNotFound(String),

    /// The seed file exists but could not be turned into a store.
    StoreLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataNotFound(path) => write!(f, "vehicle data not found: {}", path),
            Self::StoreLoad(e) => write!(f, "failed to load vehicle store: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreLoad(e) => Some(e),
            Self::DataNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatasetNotFound { path } => Self::DataNotFound(path.display().to_string()),
            other => Self::StoreLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone. The vehicle store behind the service is immutable, so
/// concurrent requests read it without any locking.
#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn VehicleService>,
    vehicles_loaded: usize,
}

impl AppState {
    /// Load the vehicle store from a JSON seed file and wire the default
    /// repository and service over it.
    pub fn load(data_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let data_path = data_path.as_ref();
        tracing::info!(path = %data_path.display(), "loading vehicle store");
        let store = VehicleStore::load(data_path)?;
        Ok(Self::from_store(store))
    }

    /// Wire the default repository and service over an existing store.
    pub fn from_store(store: VehicleStore) -> Self {
        let vehicles_loaded = store.len();
        let repository = VehicleMapRepository::new(Arc::new(store));
        Self {
            service: Arc::new(DefaultVehicleService::new(repository)),
            vehicles_loaded,
        }
    }

    /// Use an arbitrary service implementation.
    ///
    /// This is useful for testing handlers against a stub service.
    pub fn from_service(service: Arc<dyn VehicleService>, vehicles_loaded: usize) -> Self {
        Self {
            service,
            vehicles_loaded,
        }
    }

    pub fn service(&self) -> &dyn VehicleService {
        self.service.as_ref()
    }

    /// Number of vehicles in the backing store.
    pub fn vehicles_loaded(&self) -> usize {
        self.vehicles_loaded
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("vehicles_loaded", &self.vehicles_loaded)
            .finish()
    }
}
