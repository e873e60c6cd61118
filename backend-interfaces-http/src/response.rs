// Success envelope shared by all JSON endpoints

use serde::Serialize;

use backend_application::dtos::{BookingView, EventView};

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookings: Option<Vec<BookingView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
}

impl ApiResponse {
    fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn event(event: EventView) -> Self {
        Self {
            event: Some(event),
            ..Self::ok()
        }
    }

    pub fn events(events: Vec<EventView>) -> Self {
        Self {
            events: Some(events),
            ..Self::ok()
        }
    }

    pub fn booking(booking: BookingView) -> Self {
        Self {
            booking: Some(booking),
            ..Self::ok()
        }
    }

    pub fn bookings(bookings: Vec<BookingView>) -> Self {
        Self {
            bookings: Some(bookings),
            ..Self::ok()
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    pub fn redirect(ticket_url: String) -> Self {
        Self {
            ticket_url: Some(ticket_url),
            message: Some("this event is booked on the organizer's ticketing site".to_string()),
            ..Self::ok()
        }
    }
}
