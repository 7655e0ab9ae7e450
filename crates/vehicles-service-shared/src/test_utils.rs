//! Test utilities for handler testing.
//!
//! Provides a fixture-backed [`AppState`], the canonical Ford Fiesta record,
//! and [`StubVehicleService`], a service double that returns canned answers
//! and records how it was called.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use vehicles_lib::{
    Dimensions, Error as LibError, Result as LibResult, SearchQuery, Vehicle, VehicleMap,
    VehicleService,
};

use crate::state::AppState;

/// Path to the JSON seed fixture.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/vehicles.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Get a shared `AppState` loaded from the fixture seed file.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_data_path();
            AppState::load(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

pub fn fixture_data_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// The Ford Fiesta (id 1) present in the fixture.
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

pub fn fiesta_map() -> VehicleMap {
    VehicleMap::from([(1, fiesta())])
}

/// A call received by [`StubVehicleService`].
#[derive(Debug, Clone, PartialEq)]
pub enum StubCall {
    ColorAndYear(String, i64),
    BrandAndYearRange(String, i64, i64),
    AverageMaxSpeed(String),
    AverageCapacity(String),
    WeightSearch(SearchQuery),
}

/// Canned-answer [`VehicleService`].
///
/// Every method answers `NoVehicles` unless a value was configured;
/// [`StubVehicleService::failing`] makes every method fail with a
/// repository error instead.
#[derive(Debug, Default)]
pub struct StubVehicleService {
    vehicles: Option<VehicleMap>,
    average_speed: Option<f64>,
    average_capacity: Option<u32>,
    fail: bool,
    calls: Mutex<Vec<StubCall>>,
}

impl StubVehicleService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_vehicles(mut self, vehicles: VehicleMap) -> Self {
        self.vehicles = Some(vehicles);
        self
    }

    pub fn with_average_speed(mut self, average: f64) -> Self {
        self.average_speed = Some(average);
        self
    }

    pub fn with_average_capacity(mut self, average: u32) -> Self {
        self.average_capacity = Some(average);
        self
    }

    /// Wrap the stub in an `AppState`, keeping a handle for call assertions.
    pub fn into_state(self) -> (Arc<Self>, AppState) {
        let stub = Arc::new(self);
        let service: Arc<dyn VehicleService> = stub.clone();
        (stub, AppState::from_service(service, 1))
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn answer<T: Clone>(&self, call: StubCall, value: &Option<T>) -> LibResult<T> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.fail {
            return Err(LibError::Repository {
                message: "stub failure".to_string(),
            });
        }
        value.clone().ok_or(LibError::NoVehicles)
    }
}

impl VehicleService for StubVehicleService {
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> LibResult<VehicleMap> {
        self.answer(
            StubCall::ColorAndYear(color.to_string(), fabrication_year),
            &self.vehicles,
        )
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> LibResult<VehicleMap> {
        self.answer(
            StubCall::BrandAndYearRange(brand.to_string(), start_year, end_year),
            &self.vehicles,
        )
    }

    fn average_max_speed_by_brand(&self, brand: &str) -> LibResult<f64> {
        self.answer(
            StubCall::AverageMaxSpeed(brand.to_string()),
            &self.average_speed,
        )
    }

    fn average_capacity_by_brand(&self, brand: &str) -> LibResult<u32> {
        self.answer(
            StubCall::AverageCapacity(brand.to_string()),
            &self.average_capacity,
        )
    }

    fn search_by_weight_range(&self, query: SearchQuery) -> LibResult<VehicleMap> {
        self.answer(StubCall::WeightSearch(query), &self.vehicles)
    }
}
