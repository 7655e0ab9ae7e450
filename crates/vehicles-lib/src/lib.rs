//! Vehicle query library entry points.
//!
//! This crate owns the in-memory vehicle collection and the two layers that
//! answer questions about it: a read-only [`VehicleRepository`] and the
//! [`VehicleService`] that adds empty-result semantics and aggregates.
//! HTTP consumers should only depend on the items exported here.
//!
//! ```text
//! VehicleService  (empty result => Error::NoVehicles, averages, dispatch)
//!       |
//! VehicleRepository  (full-scan filters, never mutates)
//!       |
//! VehicleStore  (immutable id -> Vehicle map)
//! ```

#![deny(warnings)]

pub mod error;
pub mod query;
pub mod repository;
pub mod service;
pub mod store;
pub mod vehicle;

#[cfg(test)]
mod test_helpers;

pub use error::{Error, Result};
pub use query::SearchQuery;
pub use repository::{VehicleMapRepository, VehicleRepository};
pub use service::{DefaultVehicleService, VehicleService};
pub use store::VehicleStore;
pub use vehicle::{Dimensions, Vehicle, VehicleId, VehicleMap};
