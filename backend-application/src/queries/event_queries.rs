use tracing::{debug, warn};

use crate::commands::booking_commands::fetch_external_event;
use crate::{AppError, AppState};
use backend_domain::{
    aggregate_events, can_mutate_event, normalize_batch, vendor_id_of, Actor, CatalogSearch,
    Event, EventQuery,
};

/// Local lookup, or a catalog fetch for namespaced external ids.
pub async fn get_event(state: &AppState, event_id: &str) -> Result<Event, AppError> {
    if let Some(vendor_id) = vendor_id_of(event_id) {
        return fetch_external_event(state, vendor_id).await;
    }
    state
        .event_store
        .get_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event '{}' not found", event_id)))
}

pub async fn list_events(state: &AppState, query: EventQuery) -> Result<Vec<Event>, AppError> {
    let local = state.event_store.list_events().await?;
    let external = if query.scope.includes_external() {
        fetch_external_events(state, &query).await
    } else {
        Vec::new()
    };
    Ok(aggregate_events(
        local,
        external,
        &query,
        &state.config.home_region,
    ))
}

/// Local events the actor may edit or delete.
pub async fn list_organizer_events(
    state: &AppState,
    actor: &Actor,
) -> Result<Vec<Event>, AppError> {
    let events = state.event_store.list_events().await?;
    Ok(events
        .into_iter()
        .filter(|event| can_mutate_event(actor, event))
        .collect())
}

/// Catalog failures degrade to an empty set; listings never fail on them.
async fn fetch_external_events(state: &AppState, query: &EventQuery) -> Vec<Event> {
    let search = query.search.trim();
    let request = CatalogSearch {
        location: state.config.catalog_location.clone(),
        within: Some(state.config.catalog_within.clone()),
        category: None,
        query: (!search.is_empty()).then(|| search.to_string()),
        sort_by: Some("date".to_string()),
    };
    let records = match state.catalog.search_events(&request).await {
        Ok(records) => records,
        Err(err) => {
            state.metrics.record_catalog_failure();
            warn!("external catalog unavailable, listing local events only: {}", err);
            return Vec::new();
        }
    };
    let batch = normalize_batch(&records);
    if !batch.skipped.is_empty() {
        state.metrics.record_skipped_records(batch.skipped.len());
        for err in &batch.skipped {
            warn!("catalog record skipped: {}", err);
        }
    }
    debug!(
        fetched = records.len(),
        kept = batch.events.len(),
        "catalog events normalized"
    );
    batch.events
}
