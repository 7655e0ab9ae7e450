//! Business rules on top of the repository.
//!
//! The service is the only layer that turns an empty result into
//! [`Error::NoVehicles`]. Repository errors pass through unchanged and win
//! over the empty check.

use tracing::debug;

use crate::error::{Error, Result};
use crate::query::SearchQuery;
use crate::repository::VehicleRepository;
use crate::vehicle::VehicleMap;

/// Vehicle queries and aggregates exposed to the HTTP layer.
pub trait VehicleService: Send + Sync {
    /// Vehicles of the given color fabricated in `fabrication_year`.
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap>;

    /// Vehicles of `brand` fabricated within `[start_year, end_year]`.
    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap>;

    /// Arithmetic mean of max speed across every vehicle of `brand`.
    fn average_max_speed_by_brand(&self, brand: &str) -> Result<f64>;

    /// Mean passenger capacity across every vehicle of `brand`, truncated.
    fn average_capacity_by_brand(&self, brand: &str) -> Result<u32>;

    /// Unfiltered listing or weight range search, depending on `query`.
    fn search_by_weight_range(&self, query: SearchQuery) -> Result<VehicleMap>;
}

/// Default [`VehicleService`] over any [`VehicleRepository`].
#[derive(Debug, Clone)]
pub struct DefaultVehicleService<R> {
    repository: R,
}

impl<R: VehicleRepository> DefaultVehicleService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

fn non_empty(vehicles: VehicleMap) -> Result<VehicleMap> {
    if vehicles.is_empty() {
        return Err(Error::NoVehicles);
    }
    Ok(vehicles)
}

impl<R: VehicleRepository> VehicleService for DefaultVehicleService<R> {
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap> {
        let vehicles = self
            .repository
            .find_by_color_and_year(color, fabrication_year)?;
        debug!(color, fabrication_year, matched = vehicles.len(), "color/year lookup");
        non_empty(vehicles)
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap> {
        let vehicles = self
            .repository
            .find_by_brand_and_year_range(brand, start_year, end_year)?;
        debug!(brand, start_year, end_year, matched = vehicles.len(), "brand/year range lookup");
        non_empty(vehicles)
    }

    fn average_max_speed_by_brand(&self, brand: &str) -> Result<f64> {
        let vehicles = non_empty(self.repository.find_by_brand(brand)?)?;
        let total: f64 = vehicles.values().map(|v| v.max_speed).sum();
        Ok(total / vehicles.len() as f64)
    }

    fn average_capacity_by_brand(&self, brand: &str) -> Result<u32> {
        let vehicles = non_empty(self.repository.find_by_brand(brand)?)?;
        let total: u64 = vehicles.values().map(|v| u64::from(v.capacity)).sum();
        // Integer division truncates toward zero.
        let average = total / vehicles.len() as u64;
        Ok(u32::try_from(average).unwrap_or(u32::MAX))
    }

    fn search_by_weight_range(&self, query: SearchQuery) -> Result<VehicleMap> {
        let vehicles = match query {
            SearchQuery::All => self.repository.find_all()?,
            SearchQuery::WeightRange {
                from_weight,
                to_weight,
            } => self.repository.find_by_weight_range(from_weight, to_weight)?,
        };
        debug!(query = ?query, matched = vehicles.len(), "weight search");
        non_empty(vehicles)
    }
}
