use tracing::info;

use crate::{AppError, AppState};
use backend_domain::{vendor_id_of, Actor, Event, EventDraft, EventPatch};

pub async fn create_event(
    state: &AppState,
    actor: &Actor,
    draft: EventDraft,
) -> Result<Event, AppError> {
    let event = state.event_store.create_event(&draft, actor).await?;
    state.metrics.record_event_created();
    info!(event_id = %event.id, organizer_id = %actor.id, "event created");
    Ok(event)
}

pub async fn update_event(
    state: &AppState,
    actor: &Actor,
    event_id: &str,
    patch: EventPatch,
) -> Result<Event, AppError> {
    reject_external(event_id, "edited")?;
    let event = state
        .event_store
        .update_event(event_id, &patch, actor)
        .await?;
    info!(event_id = %event.id, actor_id = %actor.id, "event updated");
    Ok(event)
}

pub async fn delete_event(
    state: &AppState,
    actor: &Actor,
    event_id: &str,
) -> Result<Event, AppError> {
    reject_external(event_id, "deleted")?;
    let event = state.event_store.delete_event(event_id, actor).await?;
    state.metrics.record_event_deleted();
    info!(event_id = %event.id, actor_id = %actor.id, "event deleted");
    Ok(event)
}

fn reject_external(event_id: &str, action: &str) -> Result<(), AppError> {
    if vendor_id_of(event_id).is_some() {
        return Err(AppError::Forbidden(format!(
            "external events are read-only and cannot be {}",
            action
        )));
    }
    Ok(())
}
