//! Vehicle endpoints and the router that mounts them.
//!
//! Each handler parses its parameters, calls the [`VehicleService`] held in
//! [`AppState`], and renders the result. Parameter errors short-circuit
//! with 400 before the service is touched.
//!
//! [`VehicleService`]: vehicles_lib::VehicleService

use axum::{
    extract::{
        path::ErrorKind,
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use vehicles_lib::{Error as LibError, Result as LibResult, VehicleMap};

use crate::error::{from_lib_error, ErrorResponse};

const MESSAGE_INVALID_PATH: &str = "invalid path parameters";
use crate::health::{health_live, health_ready};
use crate::metrics::{
    metrics_handler, record_vehicle_query, record_vehicles_returned, DEFAULT_METRICS_PATH,
};
use crate::middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
use crate::request::{
    BrandParams, BrandYearRangeParams, ColorYearParams, ParamError, Validate, WeightParams,
};
use crate::response::{ApiResponse, ServiceResponse};
use crate::state::AppState;

/// Build the service router with every vehicle, health, and metrics route.
pub fn router(state: AppState) -> Router {
    router_with_metrics_path(state, DEFAULT_METRICS_PATH)
}

/// Like [`router`], but serves Prometheus metrics at `metrics_path`.
pub fn router_with_metrics_path(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/vehicles/color/{color}/{year}", get(find_by_color_and_year))
        .route(
            "/vehicles/brand/{brand}/{start_year}/{end_year}",
            get(find_by_brand_and_year_range),
        )
        .route(
            "/vehicles/average_speed/brand/{brand}",
            get(average_max_speed_by_brand),
        )
        .route(
            "/vehicles/average_capacity/brand/{brand}",
            get(average_capacity_by_brand),
        )
        .route("/vehicles/weight", get(search_by_weight_range))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

fn rejected<T>(query: &str, request_id: &RequestId, err: ParamError) -> ApiResponse<T> {
    warn!(request_id = %request_id, query, field = err.field(), "invalid request parameter");
    record_vehicle_query(query, "invalid_request");
    ErrorResponse::from(err).into()
}

/// Map a `Path` extraction failure onto the JSON 400 envelope, naming the
/// year parameter when axum reports which key it could not decode.
fn path_rejected<T>(
    query: &str,
    request_id: &RequestId,
    rejection: &PathRejection,
) -> ApiResponse<T> {
    let key = match rejection {
        PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } | ErrorKind::ParseErrorAtKey { key, .. } => {
                Some(key.as_str())
            }
            _ => None,
        },
        _ => None,
    };

    match key.and_then(ParamError::from_field) {
        Some(err) => rejected(query, request_id, err),
        None => {
            warn!(request_id = %request_id, query, error = %rejection, "malformed path");
            record_vehicle_query(query, "invalid_request");
            ErrorResponse::bad_request(MESSAGE_INVALID_PATH).into()
        }
    }
}

fn failed<T>(query: &str, request_id: &RequestId, err: &LibError) -> ApiResponse<T> {
    if err.is_no_vehicles() {
        info!(request_id = %request_id, query, "no vehicles matched");
        record_vehicle_query(query, "not_found");
    } else {
        error!(request_id = %request_id, query, error = %err, "vehicle query failed");
        record_vehicle_query(query, "error");
    }
    from_lib_error(err).into()
}

fn vehicles_found(
    query: &str,
    request_id: &RequestId,
    result: LibResult<VehicleMap>,
) -> ApiResponse<VehicleMap> {
    match result {
        Ok(vehicles) => {
            info!(request_id = %request_id, query, count = vehicles.len(), "vehicles found");
            record_vehicle_query(query, "found");
            record_vehicles_returned(vehicles.len(), query);
            ApiResponse::Success(ServiceResponse::vehicles_found(vehicles))
        }
        Err(err) => failed(query, request_id, &err),
    }
}

/// Handle GET /vehicles/color/{color}/{year}.
async fn find_by_color_and_year(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<ColorYearParams>, PathRejection>,
) -> ApiResponse<VehicleMap> {
    const QUERY: &str = "color_year";
    let request_id = extract_or_generate_request_id(&headers);
    let Path(params) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejected(QUERY, &request_id, &rejection),
    };
    info!(
        request_id = %request_id,
        color = %params.color,
        year = %params.year,
        "handling color/year request"
    );

    let query = match params.validate() {
        Ok(query) => query,
        Err(err) => return rejected(QUERY, &request_id, err),
    };

    let result = state
        .service()
        .find_by_color_and_year(&query.color, query.year);
    vehicles_found(QUERY, &request_id, result)
}

/// Handle GET /vehicles/brand/{brand}/{start_year}/{end_year}.
async fn find_by_brand_and_year_range(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<BrandYearRangeParams>, PathRejection>,
) -> ApiResponse<VehicleMap> {
    const QUERY: &str = "brand_year_range";
    let request_id = extract_or_generate_request_id(&headers);
    let Path(params) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejected(QUERY, &request_id, &rejection),
    };
    info!(
        request_id = %request_id,
        brand = %params.brand,
        start_year = %params.start_year,
        end_year = %params.end_year,
        "handling brand/year range request"
    );

    let query = match params.validate() {
        Ok(query) => query,
        Err(err) => return rejected(QUERY, &request_id, err),
    };

    let result = state.service().find_by_brand_and_year_range(
        &query.brand,
        query.start_year,
        query.end_year,
    );
    vehicles_found(QUERY, &request_id, result)
}

/// Handle GET /vehicles/average_speed/brand/{brand}.
async fn average_max_speed_by_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<BrandParams>, PathRejection>,
) -> ApiResponse<f64> {
    const QUERY: &str = "average_speed";
    let request_id = extract_or_generate_request_id(&headers);
    let Path(params) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejected(QUERY, &request_id, &rejection),
    };
    info!(request_id = %request_id, brand = %params.brand, "handling average speed request");

    match state.service().average_max_speed_by_brand(&params.brand) {
        Ok(average) => {
            info!(request_id = %request_id, average, "average max speed computed");
            record_vehicle_query(QUERY, "found");
            ApiResponse::Success(ServiceResponse::average_max_speed_found(average))
        }
        Err(err) => failed(QUERY, &request_id, &err),
    }
}

/// Handle GET /vehicles/average_capacity/brand/{brand}.
async fn average_capacity_by_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<BrandParams>, PathRejection>,
) -> ApiResponse<u32> {
    const QUERY: &str = "average_capacity";
    let request_id = extract_or_generate_request_id(&headers);
    let Path(params) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejected(QUERY, &request_id, &rejection),
    };
    info!(request_id = %request_id, brand = %params.brand, "handling average capacity request");

    match state.service().average_capacity_by_brand(&params.brand) {
        Ok(average) => {
            info!(request_id = %request_id, average, "average capacity computed");
            record_vehicle_query(QUERY, "found");
            ApiResponse::Success(ServiceResponse::average_capacity_found(average))
        }
        Err(err) => failed(QUERY, &request_id, &err),
    }
}

/// Handle GET /vehicles/weight?weight_min=..&weight_max=..
async fn search_by_weight_range(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<WeightParams>, QueryRejection>,
) -> ApiResponse<VehicleMap> {
    const QUERY: &str = "weight";
    let request_id = extract_or_generate_request_id(&headers);

    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "malformed query string");
            record_vehicle_query(QUERY, "invalid_request");
            return ErrorResponse::bad_request("invalid query string").into();
        }
    };
    info!(
        request_id = %request_id,
        weight_min = ?params.weight_min,
        weight_max = ?params.weight_max,
        "handling weight search request"
    );

    let query = match params.validate() {
        Ok(query) => query,
        Err(err) => return rejected(QUERY, &request_id, err),
    };

    let result = state.service().search_by_weight_range(query);
    vehicles_found(QUERY, &request_id, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use vehicles_lib::SearchQuery;

    use crate::test_utils::{fiesta_map, StubCall, StubVehicleService};

    fn fiesta_json() -> Value {
        json!({
            "Id": 1,
            "Brand": "Ford",
            "Model": "Fiesta",
            "Registration": "ABC-123",
            "Color": "red",
            "FabricationYear": 2010,
            "Capacity": 5,
            "MaxSpeed": 180.0,
            "FuelType": "gasoline",
            "Transmission": "manual",
            "Weight": 1000.0,
            "Height": 1.5,
            "Length": 4.0,
            "Width": 1.8
        })
    }

    fn server(stub: StubVehicleService) -> (std::sync::Arc<StubVehicleService>, TestServer) {
        let (stub, state) = stub.into_state();
        let server = TestServer::new(router(state)).unwrap();
        (stub, server)
    }

    #[tokio::test]
    async fn color_and_year_success() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/color/red/2010").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "message": "vehicles found",
            "data": { "1": fiesta_json() }
        }));
        assert_eq!(
            stub.calls(),
            vec![StubCall::ColorAndYear("red".to_string(), 2010)]
        );
    }

    #[tokio::test]
    async fn color_and_year_invalid_year() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/color/red/201a").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"status": "Bad Request", "message": "invalid year"}));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn color_and_year_not_found() {
        let (_stub, server) = server(StubVehicleService::new());

        let response = server.get("/vehicles/color/red/2020").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"status": "Not Found", "message": "vehicles not found"}));
    }

    #[tokio::test]
    async fn brand_and_year_range_success() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/brand/Ford/2010/2015").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "message": "vehicles found",
            "data": { "1": fiesta_json() }
        }));
        assert_eq!(
            stub.calls(),
            vec![StubCall::BrandAndYearRange("Ford".to_string(), 2010, 2015)]
        );
    }

    #[tokio::test]
    async fn brand_and_year_range_invalid_start_year() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/brand/Ford/201a/2015").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"status": "Bad Request", "message": "invalid start_year"}));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn brand_and_year_range_invalid_end_year() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/brand/Ford/2010/201a").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"status": "Bad Request", "message": "invalid end_year"}));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn average_max_speed_success() {
        let (stub, server) = server(StubVehicleService::new().with_average_speed(180.0));

        let response = server.get("/vehicles/average_speed/brand/Ford").await;

        response.assert_status_ok();
        response.assert_json(&json!({"message": "average max speed found", "data": 180.0}));
        assert_eq!(
            stub.calls(),
            vec![StubCall::AverageMaxSpeed("Ford".to_string())]
        );
    }

    #[tokio::test]
    async fn average_max_speed_not_found() {
        let (stub, server) = server(StubVehicleService::new());

        let response = server.get("/vehicles/average_speed/brand/Ford").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"status": "Not Found", "message": "vehicles not found"}));
        assert_eq!(stub.calls().len(), 1);
    }

    #[tokio::test]
    async fn average_capacity_success() {
        let (stub, server) = server(StubVehicleService::new().with_average_capacity(5));

        let response = server.get("/vehicles/average_capacity/brand/Ford").await;

        response.assert_status_ok();
        response.assert_json(&json!({"message": "average capacity found", "data": 5}));
        assert_eq!(
            stub.calls(),
            vec![StubCall::AverageCapacity("Ford".to_string())]
        );
    }

    #[tokio::test]
    async fn average_capacity_not_found() {
        let (_stub, server) = server(StubVehicleService::new());

        let response = server.get("/vehicles/average_capacity/brand/Ford").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"status": "Not Found", "message": "vehicles not found"}));
    }

    #[tokio::test]
    async fn weight_range_success() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server
            .get("/vehicles/weight")
            .add_query_param("weight_min", "1000")
            .add_query_param("weight_max", "2000")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "message": "vehicles found",
            "data": { "1": fiesta_json() }
        }));
        assert_eq!(
            stub.calls(),
            vec![StubCall::WeightSearch(SearchQuery::WeightRange {
                from_weight: 1000.0,
                to_weight: 2000.0
            })]
        );
    }

    #[tokio::test]
    async fn weight_without_bounds_is_unfiltered() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/weight").await;

        response.assert_status_ok();
        assert_eq!(stub.calls(), vec![StubCall::WeightSearch(SearchQuery::All)]);
    }

    #[tokio::test]
    async fn weight_min_not_a_number() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server
            .get("/vehicles/weight")
            .add_query_param("weight_min", "abc")
            .add_query_param("weight_max", "2000")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"status": "Bad Request", "message": "invalid weight_min"}));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn weight_max_not_a_number() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server
            .get("/vehicles/weight")
            .add_query_param("weight_min", "1000")
            .add_query_param("weight_max", "abc")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"status": "Bad Request", "message": "invalid weight_max"}));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn weight_empty_result_is_not_found() {
        let (_stub, server) = server(StubVehicleService::new());

        let response = server
            .get("/vehicles/weight")
            .add_query_param("weight_min", "2000")
            .add_query_param("weight_max", "1000")
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({"status": "Not Found", "message": "vehicles not found"}));
    }

    #[tokio::test]
    async fn unexpected_service_error_is_internal_error() {
        let (_stub, server) = server(StubVehicleService::failing());

        let response = server.get("/vehicles/color/red/2010").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({
            "status": "Internal Server Error",
            "message": "internal server error"
        }));
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let (_stub, server) = server(StubVehicleService::new().with_average_capacity(5));

        let response = server
            .get("/vehicles/average_capacity/brand/Ford")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("req-abc"),
            )
            .await;

        assert_eq!(
            response.headers().get("x-request-id"),
            Some(&HeaderValue::from_static("req-abc"))
        );
    }

    #[tokio::test]
    async fn health_probes() {
        let (_stub, server) = server(StubVehicleService::new());

        server.get("/health/live").await.assert_status_ok();
        let ready = server.get("/health/ready").await;
        ready.assert_status_ok();
        assert_eq!(ready.json::<Value>()["vehicles_loaded"], json!(1));
    }

    #[tokio::test]
    async fn metrics_served_at_configured_path() {
        let (_stub, state) = StubVehicleService::new().into_state();
        let server = TestServer::new(router_with_metrics_path(state, "/internal/metrics")).unwrap();

        server.get("/internal/metrics").await.assert_status_ok();
        server.get("/metrics").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn undecodable_year_gets_json_envelope() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/color/red/%FF").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"status": "Bad Request", "message": "invalid year"}));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn undecodable_start_year_gets_json_envelope() {
        let (stub, server) = server(StubVehicleService::new().with_vehicles(fiesta_map()));

        let response = server.get("/vehicles/brand/Ford/%FF/2010").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"status": "Bad Request", "message": "invalid start_year"}));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn undecodable_brand_gets_generic_json_envelope() {
        let (stub, server) = server(StubVehicleService::new().with_average_speed(180.0));

        let response = server.get("/vehicles/average_speed/brand/%FF").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "status": "Bad Request",
            "message": "invalid path parameters"
        }));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn year_beyond_32_bits_reaches_service() {
        let (stub, server) = server(StubVehicleService::new());

        let response = server.get("/vehicles/color/red/3000000000").await;

        response.assert_status_not_found();
        assert_eq!(
            stub.calls(),
            vec![StubCall::ColorAndYear("red".to_string(), 3_000_000_000)]
        );
    }
}
