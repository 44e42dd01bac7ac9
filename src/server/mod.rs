//! HTTP surface: the sweep endpoint, liveness check and the client document
//!
//! Every handler is stateless apart from the shared `Sensor`, which needs no
//! locking (per-request RNG clone, atomic timestamp guard).

mod config;

pub use config::{ConfigError, ServerConfig};

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::core::{Clock, MonotonicClock, RandomSource, Sensor, Sweep, SystemClock, ThreadRandom};

/// Document that boots the browser client
const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub const HEALTH_MESSAGE: &str = "3D LIDAR server is running";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Production router: thread RNG and wall clock
pub fn app(config: &ServerConfig) -> Router {
    router(
        Sensor::new(ThreadRandom, MonotonicClock::new(SystemClock)),
        &config.pkg_dir,
    )
}

/// Router over an arbitrary sensor, `pkg_dir` holds the compiled client bundle
pub fn router<R, C>(sensor: Sensor<R, C>, pkg_dir: &Path) -> Router
where
    R: RandomSource + Clone + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/api/lidar-data", get(lidar_data::<R, C>))
        .route("/health", get(health))
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(sensor))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn lidar_data<R, C>(State(sensor): State<Arc<Sensor<R, C>>>) -> Json<Sweep>
where
    R: RandomSource + Clone + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let sweep = sensor.sweep();
    debug!(count = sweep.count, timestamp = sweep.timestamp, "Serving sweep");
    Json(sweep)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: HEALTH_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::response::Response;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};

    use super::*;
    use crate::core::data::COLOR_NEAR;
    use crate::core::generator::{FixedClock, ScriptedRandom};

    fn test_app() -> Router {
        app(&ServerConfig::default())
    }

    async fn get(router: Router, uri: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build");
        router
            .oneshot(request)
            .await
            .expect("request should complete")
    }

    async fn read_body_bytes(response: Response) -> axum::body::Bytes {
        response
            .into_body()
            .collect()
            .await
            .expect("response body should collect")
            .to_bytes()
    }

    async fn parse_json_response<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = read_body_bytes(response).await;
        serde_json::from_slice(&bytes).expect("response should decode as JSON")
    }

    #[tokio::test]
    async fn lidar_data_returns_full_sweep() {
        let response = get(test_app(), "/api/lidar-data").await;
        assert_eq!(response.status(), StatusCode::OK);

        let value: serde_json::Value = parse_json_response(response).await;
        assert_eq!(value["count"], 72);
        assert!(value["timestamp"].as_f64().is_some());

        let points = value["points"].as_array().expect("points array");
        assert_eq!(points.len(), 72);
        for p in points {
            for key in ["x", "y", "z", "distance"] {
                assert!(p[key].is_number(), "missing {key}");
            }
            assert_eq!(p["color"].as_array().map(|c| c.len()), Some(3));
        }
    }

    #[tokio::test]
    async fn lidar_data_is_regenerated_per_request() {
        let router = test_app();
        let first: Sweep = parse_json_response(get(router.clone(), "/api/lidar-data").await).await;
        let second: Sweep = parse_json_response(get(router, "/api/lidar-data").await).await;

        assert!(second.timestamp > first.timestamp);
        assert_eq!(first.count, 72);
        assert_eq!(second.count, 72);
    }

    #[tokio::test]
    async fn lidar_data_with_scripted_sensor() {
        let sensor = Sensor::new(
            ScriptedRandom::new(vec![80.0, 6.5]),
            MonotonicClock::new(FixedClock(1_700_000_000.0)),
        );
        let router = router(sensor, &PathBuf::from("pkg"));

        let sweep: Sweep = parse_json_response(get(router.clone(), "/api/lidar-data").await).await;
        let first = sweep.points[0];
        assert_eq!(first.x, 80.0);
        assert_eq!(first.y, 0.0);
        assert_eq!(first.z, 6.5);
        assert_eq!(first.color, COLOR_NEAR);
        assert_eq!(first.distance, 80.0);

        // Frozen clock still yields strictly increasing timestamps
        let again: Sweep = parse_json_response(get(router, "/api/lidar-data").await).await;
        assert!(again.timestamp > sweep.timestamp);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = get(test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let payload: HealthResponse = parse_json_response(response).await;
        assert_eq!(payload.status, "ok");
        assert_eq!(payload.message, HEALTH_MESSAGE);
    }

    #[tokio::test]
    async fn index_serves_client_document() {
        let response = get(test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = read_body_bytes(response).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("lidar_canvas"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = get(test_app(), "/api/lidar").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
