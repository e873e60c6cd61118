use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::entities::{Actor, Booking, BookingWithEvent, Event, EventDraft, EventPatch};
use crate::errors::DomainError;

/// Owns locally-created events. Mutations enforce the access gate and the
/// deletion-safety rule inside the same critical section as the write.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, draft: &EventDraft, actor: &Actor) -> Result<Event, DomainError>;
    async fn get_event(&self, id: &str) -> Result<Option<Event>, DomainError>;
    async fn list_events(&self) -> Result<Vec<Event>, DomainError>;
    async fn update_event(
        &self,
        id: &str,
        patch: &EventPatch,
        actor: &Actor,
    ) -> Result<Event, DomainError>;
    async fn delete_event(&self, id: &str, actor: &Actor) -> Result<Event, DomainError>;
}

/// Owns bookings. `reserve` and `release` apply the attendee-count change
/// and the booking-record change as one unit.
#[async_trait]
pub trait BookingLedger: Send + Sync {
    async fn reserve(&self, event_id: &str, user_id: &str) -> Result<Booking, DomainError>;
    async fn release(&self, booking_id: &str, actor: &Actor) -> Result<Booking, DomainError>;
    /// The user's bookings joined with their events, labelled relative to `now`.
    async fn list_for_user(
        &self,
        user_id: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<BookingWithEvent>, DomainError>;
    async fn verify_consistency(&self) -> Result<(), DomainError>;
}
