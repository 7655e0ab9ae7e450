//! Raw request parameters and their validation.
//!
//! Path and query parameters are extracted as strings so that a malformed
//! value produces the field-specific `invalid <name>` message instead of the
//! generic extractor rejection.

use serde::Deserialize;

use vehicles_lib::SearchQuery;

use crate::error::ErrorResponse;

/// A request parameter that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    Year,
    StartYear,
    EndYear,
    WeightMin,
    WeightMax,
}

impl ParamError {
    /// Name of the offending parameter as it appears in the URL.
    pub fn field(&self) -> &'static str {
        match self {
            ParamError::Year => "year",
            ParamError::StartYear => "start_year",
            ParamError::EndYear => "end_year",
            ParamError::WeightMin => "weight_min",
            ParamError::WeightMax => "weight_max",
        }
    }

    /// Inverse of [`ParamError::field`]; `None` for names without a
    /// dedicated message.
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "year" => Some(ParamError::Year),
            "start_year" => Some(ParamError::StartYear),
            "end_year" => Some(ParamError::EndYear),
            "weight_min" => Some(ParamError::WeightMin),
            "weight_max" => Some(ParamError::WeightMax),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}", self.field())
    }
}

impl std::error::Error for ParamError {}

impl From<ParamError> for ErrorResponse {
    fn from(err: ParamError) -> Self {
        ErrorResponse::bad_request(err.to_string())
    }
}

/// Validation trait for raw request parameters.
///
/// Turns the stringly-typed extractor output into typed service inputs.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ParamError>;
}

fn parse_year(raw: &str, err: ParamError) -> Result<i64, ParamError> {
    raw.parse().map_err(|_| err)
}

fn parse_weight(raw: &str, err: ParamError) -> Result<f64, ParamError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(err),
    }
}

/// Path parameters of `/vehicles/color/{color}/{year}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorYearParams {
    pub color: String,
    pub year: String,
}

/// Typed form of [`ColorYearParams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorYearQuery {
    pub color: String,
    pub year: i64,
}

impl Validate for ColorYearParams {
    type Output = ColorYearQuery;

    fn validate(self) -> Result<ColorYearQuery, ParamError> {
        let year = parse_year(&self.year, ParamError::Year)?;
        Ok(ColorYearQuery {
            color: self.color,
            year,
        })
    }
}

/// Path parameters of `/vehicles/brand/{brand}/{start_year}/{end_year}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandYearRangeParams {
    pub brand: String,
    pub start_year: String,
    pub end_year: String,
}

/// Typed form of [`BrandYearRangeParams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandYearRangeQuery {
    pub brand: String,
    pub start_year: i64,
    pub end_year: i64,
}

impl Validate for BrandYearRangeParams {
    type Output = BrandYearRangeQuery;

    fn validate(self) -> Result<BrandYearRangeQuery, ParamError> {
        let start_year = parse_year(&self.start_year, ParamError::StartYear)?;
        let end_year = parse_year(&self.end_year, ParamError::EndYear)?;
        Ok(BrandYearRangeQuery {
            brand: self.brand,
            start_year,
            end_year,
        })
    }
}

/// Path parameter of the per-brand average endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandParams {
    pub brand: String,
}

/// Query string of `/vehicles/weight`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightParams {
    #[serde(default)]
    pub weight_min: Option<String>,
    #[serde(default)]
    pub weight_max: Option<String>,
}

impl Validate for WeightParams {
    type Output = SearchQuery;

    /// Both bounds absent means no filter; both present must be finite
    /// numbers. A lone bound is rejected, naming the missing one.
    fn validate(self) -> Result<SearchQuery, ParamError> {
        let weight_min = self
            .weight_min
            .as_deref()
            .map(|raw| parse_weight(raw, ParamError::WeightMin))
            .transpose()?;
        let weight_max = self
            .weight_max
            .as_deref()
            .map(|raw| parse_weight(raw, ParamError::WeightMax))
            .transpose()?;

        match (weight_min, weight_max) {
            (Some(_), None) => Err(ParamError::WeightMax),
            (None, Some(_)) => Err(ParamError::WeightMin),
            (from_weight, to_weight) => Ok(SearchQuery::from_bounds(from_weight, to_weight)),
        }
    }
}
