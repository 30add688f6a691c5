use crate::geocode::{GeocodeError, PostcodesIoClient};
use crate::infra::{AppState, InMemoryEnquirySink};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use survey_quote::quoting::{
    band_for_miles, distance_from_home, quote_router, HOME_BASE_POSTCODE,
};

const MILES_TO_KILOMETRES: f64 = 1.60934;

pub(crate) fn with_quote_routes(
    sink: Arc<InMemoryEnquirySink>,
    geocoder: Arc<PostcodesIoClient>,
) -> axum::Router {
    let distance_routes = axum::Router::new()
        .route("/api/v1/distance", axum::routing::get(distance_endpoint))
        .with_state(geocoder);

    quote_router(sink)
        .merge(distance_routes)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct DistanceParams {
    #[serde(default)]
    pub(crate) postcode: Option<String>,
}

/// Live travel-distance lookup: geocode the postcode (outcode fallback
/// included), measure from the office, and report the matching band.
pub(crate) async fn distance_endpoint(
    State(geocoder): State<Arc<PostcodesIoClient>>,
    Query(params): Query<DistanceParams>,
) -> impl IntoResponse {
    let Some(postcode) = params
        .postcode
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
    else {
        let payload = json!({ "error": "query parameter \"postcode\" is required" });
        return (StatusCode::BAD_REQUEST, Json(payload));
    };

    let location = match geocoder.locate(postcode).await {
        Ok(location) => location,
        Err(error) => {
            let status = match &error {
                GeocodeError::EmptyQuery => StatusCode::BAD_REQUEST,
                GeocodeError::NotFound(_) => StatusCode::NOT_FOUND,
                GeocodeError::Upstream(_)
                | GeocodeError::InvalidResponse
                | GeocodeError::Transport(_) => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({ "error": error.to_string() });
            return (status, Json(payload));
        }
    };

    let miles = round2(distance_from_home(location.point));
    let kilometres = round2(miles * MILES_TO_KILOMETRES);
    let band = band_for_miles(Some(miles));

    let payload = json!({
        "query": location.query,
        "reference": HOME_BASE_POSTCODE,
        "location_type": location.kind.label(),
        "coordinates": {
            "latitude": location.point.latitude,
            "longitude": location.point.longitude,
        },
        "distance": {
            "miles": miles,
            "kilometres": kilometres,
        },
        "band": {
            "id": band.id,
            "label": band.label,
            "min_miles": band.min_miles,
            "max_miles": band.max_miles.is_finite().then_some(band.max_miles),
        },
    });

    (StatusCode::OK, Json(payload))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state() -> AppState {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn build_router(geocoder_url: String) -> axum::Router {
        let sink = Arc::new(InMemoryEnquirySink::default());
        let geocoder = Arc::new(PostcodesIoClient::new(geocoder_url));
        with_quote_routes(sink, geocoder).layer(Extension(test_state()))
    }

    async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let router = build_router("http://127.0.0.1:9".to_string());
        let (status, payload) = get_json(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["status"], "ok");
    }

    #[tokio::test]
    async fn distance_endpoint_requires_a_postcode() {
        let router = build_router("http://127.0.0.1:9".to_string());
        let (status, payload) = get_json(router, "/api/v1/distance").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"].as_str().expect("error").contains("postcode"));
    }

    #[tokio::test]
    async fn distance_endpoint_measures_and_bands() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/postcodes/SY132AA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 200,
                "result": { "latitude": 52.9660, "longitude": -2.6870 }
            })))
            .mount(&server)
            .await;

        let router = build_router(server.uri());
        let (status, payload) = get_json(router, "/api/v1/distance?postcode=SY13%202AA").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["location_type"], "postcode");
        assert_eq!(payload["reference"], HOME_BASE_POSTCODE);
        assert_eq!(payload["distance"]["miles"], 22.71);
        assert_eq!(payload["band"]["id"], "within-35-miles");
    }

    #[tokio::test]
    async fn distance_endpoint_maps_upstream_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let router = build_router(server.uri());
        let (status, _) = get_json(router, "/api/v1/distance?postcode=CH5%204HS").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
