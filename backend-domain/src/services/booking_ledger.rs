// Booking ledger rules
// Keeps every local event's attendee count equal to its active bookings

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Actor, Booking, BookingPeriod, BookingWithEvent};
use crate::errors::DomainError;
use crate::services::access::can_cancel_booking;
use crate::services::event_store::EventTable;
use crate::value_objects::new_booking_id;

/// Active bookings in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingTable {
    bookings: Vec<Booking>,
}

impl BookingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id == id)
    }

    pub fn active_count(&self, event_id: &str) -> usize {
        self.bookings
            .iter()
            .filter(|booking| booking.event_id == event_id)
            .count()
    }

    pub fn for_user<'a>(
        &'a self,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a Booking> + Clone + 'a {
        self.bookings
            .iter()
            .filter(move |booking| booking.user_id == user_id)
    }

    /// Reserves one spot. The capacity check, the attendee increment and
    /// the booking insert happen under the caller's exclusive borrow of
    /// both tables, so they commit together or not at all.
    pub fn book(
        &mut self,
        events: &mut EventTable,
        event_id: &str,
        user_id: &str,
        booked_at: DateTime<Utc>,
    ) -> Result<Booking, DomainError> {
        if events.get(event_id).is_none() {
            return Err(DomainError::event_not_found(event_id));
        }
        if self
            .bookings
            .iter()
            .any(|booking| booking.event_id == event_id && booking.user_id == user_id)
        {
            return Err(DomainError::Conflict(format!(
                "user '{}' has already booked event '{}'",
                user_id, event_id
            )));
        }
        events.increment_attendees(event_id)?;
        let booking = Booking {
            id: new_booking_id(),
            event_id: event_id.to_string(),
            user_id: user_id.to_string(),
            booked_at,
        };
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    /// Cancels a booking. A referenced event that is missing or already at
    /// zero attendees is reported as a consistency fault and nothing changes.
    pub fn cancel(
        &mut self,
        events: &mut EventTable,
        booking_id: &str,
        actor: &Actor,
    ) -> Result<Booking, DomainError> {
        let index = self
            .bookings
            .iter()
            .position(|booking| booking.id == booking_id)
            .ok_or_else(|| DomainError::booking_not_found(booking_id))?;
        if !can_cancel_booking(actor, &self.bookings[index]) {
            return Err(DomainError::Forbidden(
                "not authorized to cancel this booking".to_string(),
            ));
        }
        events.decrement_attendees(&self.bookings[index].event_id)?;
        Ok(self.bookings.remove(index))
    }

    /// The user's bookings joined with their events, labelled by period.
    /// Restartable: each call walks the tables afresh.
    pub fn history<'a>(
        &'a self,
        events: &'a EventTable,
        user_id: &'a str,
        now: NaiveDateTime,
    ) -> impl Iterator<Item = BookingWithEvent> + 'a {
        self.for_user(user_id).filter_map(move |booking| {
            events.get(&booking.event_id).map(|event| BookingWithEvent {
                booking: booking.clone(),
                event: event.clone(),
                period: BookingPeriod::classify(event.starts_at(), now),
            })
        })
    }
}

/// Recomputes every local event's active booking count and compares it to
/// the stored attendee figure. Also rejects bookings pointing at nothing.
pub fn verify_consistency(events: &EventTable, bookings: &BookingTable) -> Result<(), DomainError> {
    for event in events.iter() {
        let stored = event.attendees().unwrap_or_default() as usize;
        let active = bookings.active_count(&event.id);
        if stored != active {
            return Err(DomainError::Consistency(format!(
                "event '{}' reports {} attendees but has {} active bookings",
                event.id, stored, active
            )));
        }
        if stored > event.capacity as usize {
            return Err(DomainError::Consistency(format!(
                "event '{}' has {} attendees over capacity {}",
                event.id, stored, event.capacity
            )));
        }
    }
    if let Some(orphan) = bookings
        .bookings
        .iter()
        .find(|booking| events.get(&booking.event_id).is_none())
    {
        return Err(DomainError::Consistency(format!(
            "booking '{}' references missing event '{}'",
            orphan.id, orphan.event_id
        )));
    }
    Ok(())
}
