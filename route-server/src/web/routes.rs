//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::planner::{self, RouteError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `allowed_origins` are the browser origins allowed to call the API.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/find-path", post(find_path))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS for the configured origins. `*` allows any origin; origins that are
/// not valid header values are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all stations.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(stations_response(&state.network))
}

/// Find the best route between two stations.
async fn find_path(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FindPathResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: FindPathRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let (start, end) = req.endpoints().ok_or_else(|| AppError::BadRequest {
        message: "Start and end stations are required".to_string(),
    })?;

    let result = planner::find_path(&state.network, start, end, req.metric_name())?;

    Ok(Json(FindPathResponse::from_result(&state.network, result)))
}

/// Application error type.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::InvalidMetric(_) | RouteError::StationNotFound(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            RouteError::NoPath { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(status = %status, message = %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::network::NetworkData;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const LOCAL_ORIGIN: &str = "http://localhost:5173";

    fn state() -> AppState {
        AppState::new(NetworkData::demo().unwrap().into_network().unwrap())
    }

    async fn call(body: &str) -> (StatusCode, serde_json::Value) {
        let response = match find_path(State(state()), Bytes::from(body.to_string())).await {
            Ok(json) => json.into_response(),
            Err(e) => e.into_response(),
        };
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn find_path_success() {
        let (status, json) = call(r#"{"start":"A","end":"F","optimizationType":"cost"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalWeight"], 4.0);
        assert_eq!(json["path"], serde_json::json!(["A", "B", "F"]));
        assert_eq!(json["optimizationType"], "cost");
    }

    #[tokio::test]
    async fn find_path_defaults_to_time() {
        let (status, json) = call(r#"{"start":"A","end":"G"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["optimizationType"], "time");
        assert_eq!(json["totalWeight"], 10.0);
    }

    #[tokio::test]
    async fn missing_station_is_bad_request() {
        let (status, json) = call(r#"{"start":"A"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Start and end stations are required");
    }

    #[tokio::test]
    async fn unknown_station_is_bad_request() {
        let (status, json) = call(r#"{"start":"A","end":"Q"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "unknown station \"Q\"");
    }

    #[tokio::test]
    async fn invalid_metric_is_bad_request() {
        let (status, json) = call(r#"{"start":"A","end":"B","optimizationType":"speed"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("speed"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, json) = call("{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn stations_endpoint_lists_network() {
        let Json(stations) = list_stations(State(state())).await;
        assert_eq!(stations.len(), 7);
        assert_eq!(stations.values().next().unwrap().name, "Central Station");
    }

    #[test]
    fn no_path_maps_to_not_found() {
        let err = RouteError::NoPath {
            from: crate::domain::StationId::parse("A").unwrap(),
            to: crate::domain::StationId::parse("B").unwrap(),
        };
        assert_eq!(
            AppError::from(err),
            AppError::NotFound {
                message: "no path from A to B".to_string()
            }
        );
    }

    fn request(method: Method, uri: &str, origin: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(origins: &[&str], request: Request<Body>) -> Response {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        create_router(state(), &origins)
            .oneshot(request)
            .await
            .unwrap()
    }

    fn allow_origin(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap())
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let origins = ServerConfig::default().allowed_origins;
        let origins: Vec<&str> = origins.iter().map(String::as_str).collect();

        let response = send(
            &origins,
            request(Method::GET, "/health", "http://localhost:5173"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some("http://localhost:5173"));
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_cors_header() {
        let response = send(
            &[LOCAL_ORIGIN],
            request(Method::GET, "/api/stations", "http://elsewhere.example"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), None);
    }

    #[tokio::test]
    async fn preflight_allows_post_with_json_body() {
        let mut preflight = request(Method::OPTIONS, "/api/find-path", LOCAL_ORIGIN);
        preflight.headers_mut().insert(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        );
        preflight.headers_mut().insert(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("content-type"),
        );

        let response = send(&[LOCAL_ORIGIN], preflight).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some(LOCAL_ORIGIN));

        let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        let headers = response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap();
        assert!(headers.contains("content-type"));
    }

    #[tokio::test]
    async fn preflight_from_unlisted_origin_is_not_allowed() {
        let mut preflight = request(Method::OPTIONS, "/api/find-path", "http://elsewhere.example");
        preflight.headers_mut().insert(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        );

        let response = send(&[LOCAL_ORIGIN], preflight).await;

        assert_eq!(allow_origin(&response), None);
    }

    #[tokio::test]
    async fn wildcard_allows_any_origin() {
        let response = send(
            &["*"],
            request(Method::GET, "/health", "http://elsewhere.example"),
        )
        .await;

        assert_eq!(allow_origin(&response), Some("*"));
    }

    #[tokio::test]
    async fn invalid_origin_is_skipped() {
        let response = send(
            &[LOCAL_ORIGIN, "bad\norigin"],
            request(Method::GET, "/health", LOCAL_ORIGIN),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some(LOCAL_ORIGIN));
    }

    #[tokio::test]
    async fn find_path_through_router() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/find-path")
            .header(header::ORIGIN, LOCAL_ORIGIN)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"start":"D","end":"B","optimizationType":"distance"}"#))
            .unwrap();

        let response = send(&[LOCAL_ORIGIN], request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(allow_origin(&response), Some(LOCAL_ORIGIN));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["path"], serde_json::json!(["D", "C", "A", "B"]));
    }
}
