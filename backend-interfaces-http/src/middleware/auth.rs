use axum::http::HeaderMap;
use tracing::error;

use backend_application::AppState;
use backend_domain::Actor;

use crate::error::HttpError;

/// Actor for the request, if a bearer token is present. An unknown token is
/// rejected rather than treated as anonymous.
pub async fn optional_actor(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Actor>, HttpError> {
    let Some(token) = extract_bearer(headers) else {
        return Ok(None);
    };
    match state.identity.current_actor(&token).await {
        Ok(Some(actor)) => Ok(Some(actor)),
        Ok(None) => Err(HttpError::Unauthorized),
        Err(err) => {
            error!("identity lookup failed: {}", err);
            Err(HttpError::Internal("internal server error".to_string()))
        }
    }
}

pub async fn require_actor(state: &AppState, headers: &HeaderMap) -> Result<Actor, HttpError> {
    optional_actor(state, headers)
        .await?
        .ok_or(HttpError::Unauthorized)
}

pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
