use tracing::{error, info, warn};

use crate::{AppError, AppState};
use backend_domain::{
    normalize_value, vendor_id_of, Actor, Booking, BookingReceipt, DomainError, Event,
};

/// Reserves a spot at a local event, or answers with the ticket link for a
/// catalog event. External events never touch the ledger.
pub async fn book_event(
    state: &AppState,
    actor: &Actor,
    event_id: &str,
) -> Result<BookingReceipt, AppError> {
    if let Some(vendor_id) = vendor_id_of(event_id) {
        let event = fetch_external_event(state, vendor_id).await?;
        let ticket_url = event.ticket_url().map(str::to_string).ok_or_else(|| {
            AppError::Upstream(format!("external event '{}' has no ticket link", event_id))
        })?;
        state.metrics.record_external_redirect();
        info!(event_id, user_id = %actor.id, "external booking redirected");
        return Ok(BookingReceipt::Redirect {
            event_id: event.id,
            ticket_url,
        });
    }

    match state.ledger.reserve(event_id, &actor.id).await {
        Ok(booking) => {
            state.metrics.record_booking();
            info!(booking_id = %booking.id, event_id, user_id = %actor.id, "booking created");
            Ok(BookingReceipt::Reserved(booking))
        }
        Err(err @ DomainError::Capacity { .. }) => {
            state.metrics.record_rejected_full();
            warn!(event_id, user_id = %actor.id, "booking rejected: event full");
            Err(err.into())
        }
        Err(err) => Err(observe(state, err)),
    }
}

pub async fn cancel_booking(
    state: &AppState,
    actor: &Actor,
    booking_id: &str,
) -> Result<Booking, AppError> {
    let booking = state
        .ledger
        .release(booking_id, actor)
        .await
        .map_err(|err| observe(state, err))?;
    state.metrics.record_cancellation();
    info!(booking_id, event_id = %booking.event_id, actor_id = %actor.id, "booking cancelled");
    Ok(booking)
}

pub(crate) async fn fetch_external_event(
    state: &AppState,
    vendor_id: &str,
) -> Result<Event, AppError> {
    let record = state.catalog.get_event(vendor_id).await.map_err(|err| {
        state.metrics.record_catalog_failure();
        warn!("catalog lookup for '{}' failed: {}", vendor_id, err);
        AppError::Upstream(format!("failed to fetch event '{}' from the catalog", vendor_id))
    })?;
    normalize_value(&record).map_err(|err| {
        state.metrics.record_skipped_records(1);
        warn!("catalog record '{}' skipped: {}", vendor_id, err);
        AppError::Upstream(format!("catalog returned an unusable record for '{}'", vendor_id))
    })
}

/// Counts and logs consistency faults before they leave the application.
pub(crate) fn observe(state: &AppState, err: DomainError) -> AppError {
    if let DomainError::Consistency(detail) = &err {
        state.metrics.record_consistency_fault();
        error!("consistency check failed: {}", detail);
    }
    err.into()
}
