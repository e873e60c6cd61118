// Response shapes for the HTTP surface

use chrono::{DateTime, Utc};
use serde::Serialize;

use backend_domain::{Booking, BookingPeriod, BookingWithEvent, Event, EventOrigin, EventType};

/// Canonical event as clients see it. `attendees` is null when the catalog
/// gives no attendance figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub capacity: u32,
    pub attendees: Option<u32>,
    pub spots_left: Option<u32>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub image: Option<String>,
    pub price: Option<String>,
    pub is_external: bool,
    pub organizer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        let attendees = event.attendees();
        let external_id = match &event.origin {
            EventOrigin::External { external_id, .. } => Some(external_id.clone()),
            EventOrigin::Local { .. } => None,
        };
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            description: event.description.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            time: event.time.format("%H:%M").to_string(),
            location: event.location.clone(),
            capacity: event.capacity,
            attendees,
            spots_left: attendees.map(|taken| event.capacity.saturating_sub(taken)),
            event_type: event.event_type,
            image: event.image.clone(),
            price: event.price.clone(),
            is_external: event.is_external(),
            organizer: event.organizer().to_string(),
            organizer_id: event.organizer_id().map(str::to_string),
            external_id,
            ticket_url: event.ticket_url().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub booked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<BookingPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventView>,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.clone(),
            event_id: booking.event_id.clone(),
            user_id: booking.user_id.clone(),
            booked_at: booking.booked_at,
            period: None,
            event: None,
        }
    }
}

impl From<&BookingWithEvent> for BookingView {
    fn from(entry: &BookingWithEvent) -> Self {
        Self {
            period: Some(entry.period),
            event: Some(EventView::from(&entry.event)),
            ..BookingView::from(&entry.booking)
        }
    }
}
