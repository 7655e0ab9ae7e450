use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::vehicle::{Vehicle, VehicleId, VehicleMap, VehicleRecord};

/// Immutable in-memory vehicle collection keyed by id.
///
/// Built once at startup and never mutated afterwards, so it can be shared
/// between request handlers behind an `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct VehicleStore {
    vehicles: VehicleMap,
}

impl VehicleStore {
    /// Build a store from vehicle values, rejecting duplicate identifiers.
    pub fn from_vehicles(vehicles: impl IntoIterator<Item = Vehicle>) -> Result<Self> {
        let mut map = VehicleMap::new();
        for vehicle in vehicles {
            match map.entry(vehicle.id) {
                Entry::Occupied(_) => {
                    return Err(Error::DuplicateVehicleId { id: vehicle.id });
                }
                Entry::Vacant(slot) => {
                    slot.insert(vehicle);
                }
            }
        }
        Ok(Self { vehicles: map })
    }

    /// Parse a JSON array of seed records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<VehicleRecord> = serde_json::from_str(json)?;
        debug!(records = records.len(), "decoded vehicle seed records");
        Self::from_vehicles(records.into_iter().map(Vehicle::from))
    }

    /// Load the store from a JSON seed file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path)?;
        let store = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            vehicles = store.len(),
            "vehicle store loaded"
        );
        Ok(store)
    }

    /// Lookup a single vehicle by id.
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// Iterate over every stored vehicle in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
