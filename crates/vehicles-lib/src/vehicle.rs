use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Numeric identifier for a vehicle.
pub type VehicleId = u32;

/// Result set of a vehicle query, keyed by vehicle id.
pub type VehicleMap = HashMap<VehicleId, Vehicle>;

/// Physical dimensions of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimensions {
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

/// A single vehicle record.
///
/// Serializes to the flat API shape: the dimension fields sit next to the
/// top-level attributes (`"Weight"`, `"Height"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub fabrication_year: i64,
    pub capacity: u32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

/// Record layout of the JSON seed file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VehicleRecord {
    id: VehicleId,
    brand: String,
    model: String,
    registration: String,
    color: String,
    year: i64,
    passengers: u32,
    max_speed: f64,
    fuel_type: String,
    transmission: String,
    weight: f64,
    height: f64,
    length: f64,
    width: f64,
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        Self {
            id: record.id,
            brand: record.brand,
            model: record.model,
            registration: record.registration,
            color: record.color,
            fabrication_year: record.year,
            capacity: record.passengers,
            max_speed: record.max_speed,
            fuel_type: record.fuel_type,
            transmission: record.transmission,
            weight: record.weight,
            dimensions: Dimensions {
                height: record.height,
                length: record.length,
                width: record.width,
            },
        }
    }
}
