use std::path::PathBuf;

use thiserror::Error;

use crate::vehicle::VehicleId;

/// Convenient result alias for the vehicles library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A query matched no vehicles.
    ///
    /// Raised only by the query service; the repository never treats an
    /// empty result as a failure.
    #[error("service: no vehicles")]
    NoVehicles,

    /// Vehicle seed data could not be located at the resolved path.
    #[error("vehicle data not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Two records in the seed data share the same identifier.
    #[error("duplicate vehicle id {id}")]
    DuplicateVehicleId { id: VehicleId },

    /// Failure reported by a repository backend.
    #[error("repository: {message}")]
    Repository { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` when the error means "the query matched nothing".
    pub fn is_no_vehicles(&self) -> bool {
        matches!(self, Error::NoVehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_vehicles_message_is_stable() {
        assert_eq!(Error::NoVehicles.to_string(), "service: no vehicles");
        assert!(Error::NoVehicles.is_no_vehicles());
    }

    #[test]
    fn repository_error_is_not_no_vehicles() {
        let err = Error::Repository {
            message: "connection reset".to_string(),
        };
        assert!(!err.is_no_vehicles());
        assert_eq!(err.to_string(), "repository: connection reset");
    }
}
