//! Landing and health check handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bookshelf_persistence::core::SearchEngine;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the landing route.
///
/// # HTTP Request
///
/// `GET /`
///
/// # Response
///
/// - `200 OK` - The literal text `index`
pub async fn index_handler() -> &'static str {
    "index"
}

/// Handler for the health check endpoint.
///
/// Asks the engine for its cluster health, useful for load balancers and
/// monitoring systems.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - Engine reachable and cluster green or yellow
/// - `503 Service Unavailable` - Engine unreachable, cluster red, or the
///   engine belongs to another cluster
pub async fn health_handler<E>(State(state): State<AppState<E>>) -> RestResult<Response>
where
    E: SearchEngine + ?Sized + 'static,
{
    debug!("Processing health check request");

    let engine = state.engine().engine_name();
    let health = state.gateway().health().await.map_err(|e| {
        warn!(engine, error = %e, "Health check failed");
        RestError::Unavailable {
            message: e.to_string(),
        }
    })?;

    let available = health.status.is_available();
    let status = if available {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = serde_json::json!({
        "status": if available { "healthy" } else { "unhealthy" },
        "engine": engine,
        "cluster_name": health.cluster_name,
        "cluster_status": health.status,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((status, Json(body)).into_response())
}
