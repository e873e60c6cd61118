use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::queries::health_queries;
use backend_application::AppState;

use crate::error::HttpError;

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>) -> Result<StatusCode, HttpError> {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    match timeout(
        Duration::from_secs(timeout_secs),
        health_queries::check_readiness(&state),
    )
    .await
    {
        Ok(Ok(())) => Ok(StatusCode::OK),
        Ok(Err(err)) => Err(HttpError::Unavailable(err.public_message())),
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            Err(HttpError::Unavailable("ready check timed out".to_string()))
        }
    }
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload)
}
