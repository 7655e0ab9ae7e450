//! Success envelope for vehicle endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use vehicles_lib::VehicleMap;

use crate::error::ErrorResponse;

/// `{"message": ..., "data": ...}` body returned with 200 OK.
///
/// # Example
///
/// ```
/// use vehicles_service_shared::ServiceResponse;
///
/// let response = ServiceResponse::average_capacity_found(5);
/// assert_eq!(response.message, "average capacity found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ServiceResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl ServiceResponse<VehicleMap> {
    pub fn vehicles_found(vehicles: VehicleMap) -> Self {
        Self::new("vehicles found", vehicles)
    }
}

impl ServiceResponse<f64> {
    pub fn average_max_speed_found(average: f64) -> Self {
        Self::new("average max speed found", average)
    }
}

impl ServiceResponse<u32> {
    pub fn average_capacity_found(average: u32) -> Self {
        Self::new("average capacity found", average)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// HTTP response - either a success envelope or an error envelope.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ErrorResponse),
}

impl<T> From<ErrorResponse> for ApiResponse<T> {
    fn from(error: ErrorResponse) -> Self {
        ApiResponse::Error(error)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Success(data) => data.into_response(),
            ApiResponse::Error(error) => error.into_response(),
        }
    }
}
