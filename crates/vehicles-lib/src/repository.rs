//! Read-only query primitives over the vehicle collection.
//!
//! [`VehicleRepository`] is the seam the query service depends on; the
//! in-memory [`VehicleMapRepository`] is the only backend shipped today.
//! Every filter is a full scan. An empty result is a valid answer here and is
//! never reported as an error.

use std::sync::Arc;

use crate::error::Result;
use crate::store::VehicleStore;
use crate::vehicle::{Vehicle, VehicleMap};

/// Storage interface consumed by the query service.
pub trait VehicleRepository: Send + Sync {
    /// Return every stored vehicle.
    fn find_all(&self) -> Result<VehicleMap>;

    /// Vehicles with exactly this color (case-sensitive) and fabrication year.
    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap>;

    /// Vehicles of `brand` fabricated within `[start_year, end_year]`.
    ///
    /// An inverted range matches nothing.
    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap>;

    /// Vehicles with exactly this brand.
    fn find_by_brand(&self, brand: &str) -> Result<VehicleMap>;

    /// Vehicles whose weight lies within `[from_weight, to_weight]`.
    ///
    /// An inverted range matches nothing.
    fn find_by_weight_range(&self, from_weight: f64, to_weight: f64) -> Result<VehicleMap>;
}

impl<R: VehicleRepository + ?Sized> VehicleRepository for Arc<R> {
    fn find_all(&self) -> Result<VehicleMap> {
        (**self).find_all()
    }

    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap> {
        (**self).find_by_color_and_year(color, fabrication_year)
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap> {
        (**self).find_by_brand_and_year_range(brand, start_year, end_year)
    }

    fn find_by_brand(&self, brand: &str) -> Result<VehicleMap> {
        (**self).find_by_brand(brand)
    }

    fn find_by_weight_range(&self, from_weight: f64, to_weight: f64) -> Result<VehicleMap> {
        (**self).find_by_weight_range(from_weight, to_weight)
    }
}

/// Repository backed by the shared in-memory [`VehicleStore`].
#[derive(Debug, Clone)]
pub struct VehicleMapRepository {
    store: Arc<VehicleStore>,
}

impl VehicleMapRepository {
    pub fn new(store: Arc<VehicleStore>) -> Self {
        Self { store }
    }

    fn select<P>(&self, predicate: P) -> VehicleMap
    where
        P: Fn(&Vehicle) -> bool,
    {
        self.store
            .iter()
            .filter(|&vehicle| predicate(vehicle))
            .map(|vehicle| (vehicle.id, vehicle.clone()))
            .collect()
    }
}

impl VehicleRepository for VehicleMapRepository {
    fn find_all(&self) -> Result<VehicleMap> {
        Ok(self.select(|_| true))
    }

    fn find_by_color_and_year(&self, color: &str, fabrication_year: i64) -> Result<VehicleMap> {
        Ok(self.select(|v| v.color == color && v.fabrication_year == fabrication_year))
    }

    fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i64,
        end_year: i64,
    ) -> Result<VehicleMap> {
        Ok(self.select(|v| {
            v.brand == brand && (start_year..=end_year).contains(&v.fabrication_year)
        }))
    }

    fn find_by_brand(&self, brand: &str) -> Result<VehicleMap> {
        Ok(self.select(|v| v.brand == brand))
    }

    fn find_by_weight_range(&self, from_weight: f64, to_weight: f64) -> Result<VehicleMap> {
        Ok(self.select(|v| v.weight >= from_weight && v.weight <= to_weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{fiesta, vehicle};

    fn repository(vehicles: Vec<Vehicle>) -> VehicleMapRepository {
        let store = VehicleStore::from_vehicles(vehicles).unwrap();
        VehicleMapRepository::new(Arc::new(store))
    }

    #[test]
    fn find_all_returns_every_vehicle() {
        let rp = repository(vec![fiesta()]);
        let vehicles = rp.find_all().unwrap();
        assert_eq!(vehicles.len(), 1);
        assert!(vehicles.contains_key(&1));
    }

    #[test]
    fn find_all_on_empty_store_is_not_an_error() {
        let rp = repository(vec![]);
        assert!(rp.find_all().unwrap().is_empty());
    }

    #[test]
    fn find_by_color_and_year_matches_both() {
        let rp = repository(vec![
            fiesta(),
            vehicle(2, "Ford", "red", 2011, 1200.0),
            vehicle(3, "Ford", "blue", 2010, 1200.0),
        ]);

        let vehicles = rp.find_by_color_and_year("red", 2010).unwrap();
        assert_eq!(vehicles.len(), 1);
        assert!(vehicles.contains_key(&1));
    }

    #[test]
    fn find_by_color_is_case_sensitive() {
        let rp = repository(vec![fiesta()]);
        assert!(rp.find_by_color_and_year("Red", 2010).unwrap().is_empty());
    }

    #[test]
    fn find_by_color_and_year_is_repeatable() {
        let rp = repository(vec![fiesta(), vehicle(2, "Fiat", "red", 2010, 900.0)]);
        let first = rp.find_by_color_and_year("red", 2010).unwrap();
        let second = rp.find_by_color_and_year("red", 2010).unwrap();
        assert_eq!(first, second);
        assert_eq!(rp.find_all().unwrap().len(), 2);
    }

    #[test]
    fn find_by_brand_and_year_range_is_inclusive() {
        let rp = repository(vec![
            fiesta(),
            vehicle(2, "Ford", "red", 2015, 1200.0),
            vehicle(3, "Ford", "red", 2016, 1200.0),
            vehicle(4, "Fiat", "red", 2012, 900.0),
        ]);

        let vehicles = rp.find_by_brand_and_year_range("Ford", 2010, 2015).unwrap();
        let mut ids: Vec<_> = vehicles.keys().copied().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn inverted_year_range_is_empty_not_error() {
        let rp = repository(vec![fiesta()]);
        let vehicles = rp.find_by_brand_and_year_range("Ford", 2015, 2010).unwrap();
        assert!(vehicles.is_empty());
    }

    #[test]
    fn find_by_brand_exact_match() {
        let rp = repository(vec![fiesta(), vehicle(2, "Fordson", "red", 2010, 3000.0)]);
        let vehicles = rp.find_by_brand("Ford").unwrap();
        assert_eq!(vehicles.len(), 1);
        assert!(vehicles.contains_key(&1));
    }

    #[test]
    fn find_by_weight_range_includes_bounds() {
        let rp = repository(vec![
            fiesta(),
            vehicle(2, "Ford", "red", 2010, 2000.0),
            vehicle(3, "Ford", "red", 2010, 2000.5),
        ]);

        let vehicles = rp.find_by_weight_range(1000.0, 2000.0).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert!(!vehicles.contains_key(&3));
    }

    #[test]
    fn inverted_weight_range_is_empty_not_error() {
        let rp = repository(vec![fiesta()]);
        assert!(rp.find_by_weight_range(2000.0, 1000.0).unwrap().is_empty());
    }
}
