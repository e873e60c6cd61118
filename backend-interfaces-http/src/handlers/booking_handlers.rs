use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use backend_application::commands::booking_commands;
use backend_application::dtos::BookingView;
use backend_application::queries::booking_queries;
use backend_application::AppState;
use backend_domain::BookingPeriod;

use crate::error::HttpError;
use crate::middleware::require_actor;
use crate::response::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct ListBookingsParams {
    pub period: Option<String>,
}

pub async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ListBookingsParams>, QueryRejection>,
) -> Result<Json<ApiResponse>, HttpError> {
    let actor = require_actor(&state, &headers).await?;
    let Query(params) = params?;
    let period = match params.period.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            BookingPeriod::parse(raw)
                .ok_or_else(|| HttpError::BadRequest(format!("invalid period '{}'", raw)))?,
        ),
    };
    let entries = booking_queries::list_user_bookings(&state, &actor.id, period).await?;
    Ok(Json(ApiResponse::bookings(
        entries.iter().map(BookingView::from).collect(),
    )))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, HttpError> {
    let actor = require_actor(&state, &headers).await?;
    booking_commands::cancel_booking(&state, &actor, &id).await?;
    Ok(Json(ApiResponse::message("Booking cancelled successfully")))
}
