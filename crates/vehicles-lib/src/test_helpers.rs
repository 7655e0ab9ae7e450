// Test-only helpers for `vehicles-lib` tests
#![allow(dead_code)]
use crate::vehicle::{Dimensions, Vehicle, VehicleId, VehicleMap};

/// The single Ford Fiesta used across repository and service tests.
pub fn fiesta() -> Vehicle {
    Vehicle {
        id: 1,
        brand: "Ford".to_string(),
        model: "Fiesta".to_string(),
        registration: "ABC-123".to_string(),
        color: "red".to_string(),
        fabrication_year: 2010,
        capacity: 5,
        max_speed: 180.0,
        fuel_type: "gasoline".to_string(),
        transmission: "manual".to_string(),
        weight: 1000.0,
        dimensions: Dimensions {
            height: 1.5,
            length: 4.0,
            width: 1.8,
        },
    }
}

/// A Fiesta variant with the attributes the filters look at overridden.
pub fn vehicle(id: VehicleId, brand: &str, color: &str, year: i64, weight: f64) -> Vehicle {
    Vehicle {
        id,
        brand: brand.to_string(),
        color: color.to_string(),
        fabrication_year: year,
        weight,
        registration: format!("REG-{id:04}"),
        ..fiesta()
    }
}

/// Builder to create `Vehicle` instances with sensible defaults.
pub struct VehicleBuilder {
    vehicle: Vehicle,
}

impl VehicleBuilder {
    #[must_use]
    pub fn new(id: VehicleId) -> Self {
        Self {
            vehicle: Vehicle {
                id,
                registration: format!("REG-{id:04}"),
                ..fiesta()
            },
        }
    }

    pub fn brand(mut self, brand: &str) -> Self {
        self.vehicle.brand = brand.to_string();
        self
    }

    pub fn max_speed(mut self, max_speed: f64) -> Self {
        self.vehicle.max_speed = max_speed;
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.vehicle.capacity = capacity;
        self
    }

    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}

/// Collect vehicles into a result map.
pub fn map_of(vehicles: impl IntoIterator<Item = Vehicle>) -> VehicleMap {
    vehicles.into_iter().map(|v| (v.id, v)).collect()
}
