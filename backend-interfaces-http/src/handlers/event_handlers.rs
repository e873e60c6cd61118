use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use backend_application::commands::{booking_commands, event_commands};
use backend_application::dtos::{BookingView, EventView};
use backend_application::queries::event_queries;
use backend_application::AppState;
use backend_domain::{BookingReceipt, EventDraft, EventPatch, EventQuery, Scope, TypeFilter};

use crate::error::HttpError;
use crate::middleware::require_actor;
use crate::response::ApiResponse;

type JsonResult = Result<(StatusCode, Json<ApiResponse>), HttpError>;

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsParams {
    pub scope: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl ListEventsParams {
    fn into_query(self) -> Result<EventQuery, HttpError> {
        let scope_raw = self.scope.unwrap_or_default();
        let scope = Scope::parse(&scope_raw)
            .ok_or_else(|| HttpError::BadRequest(format!("invalid scope '{}'", scope_raw)))?;
        let type_raw = self.event_type.unwrap_or_default();
        let type_filter = TypeFilter::parse(&type_raw)
            .ok_or_else(|| HttpError::BadRequest(format!("invalid type '{}'", type_raw)))?;
        Ok(EventQuery {
            scope,
            search: self.search.unwrap_or_default(),
            type_filter,
        })
    }
}

fn ok(body: ApiResponse) -> JsonResult {
    Ok((StatusCode::OK, Json(body)))
}

pub async fn list_events(
    State(state): State<AppState>,
    params: Result<Query<ListEventsParams>, QueryRejection>,
) -> JsonResult {
    let Query(params) = params?;
    let events = event_queries::list_events(&state, params.into_query()?).await?;
    ok(ApiResponse::events(events.iter().map(EventView::from).collect()))
}

pub async fn list_my_events(State(state): State<AppState>, headers: HeaderMap) -> JsonResult {
    let actor = require_actor(&state, &headers).await?;
    let events = event_queries::list_organizer_events(&state, &actor).await?;
    ok(ApiResponse::events(events.iter().map(EventView::from).collect()))
}

pub async fn get_event(State(state): State<AppState>, Path(id): Path<String>) -> JsonResult {
    let event = event_queries::get_event(&state, &id).await?;
    ok(ApiResponse::event(EventView::from(&event)))
}

pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EventDraft>, JsonRejection>,
) -> JsonResult {
    let actor = require_actor(&state, &headers).await?;
    let Json(draft) = payload?;
    let event = event_commands::create_event(&state, &actor, draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::event(EventView::from(&event))),
    ))
}

pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<EventPatch>, JsonRejection>,
) -> JsonResult {
    let actor = require_actor(&state, &headers).await?;
    let Json(patch) = payload?;
    let event = event_commands::update_event(&state, &actor, &id, patch).await?;
    ok(ApiResponse::event(EventView::from(&event)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> JsonResult {
    let actor = require_actor(&state, &headers).await?;
    event_commands::delete_event(&state, &actor, &id).await?;
    ok(ApiResponse::message("Event deleted successfully"))
}

pub async fn book_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> JsonResult {
    let actor = require_actor(&state, &headers).await?;
    match booking_commands::book_event(&state, &actor, &id).await? {
        BookingReceipt::Reserved(booking) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::booking(BookingView::from(&booking))),
        )),
        BookingReceipt::Redirect { ticket_url, .. } => ok(ApiResponse::redirect(ticket_url)),
    }
}
