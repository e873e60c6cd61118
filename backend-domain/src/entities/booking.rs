// Booking entity

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Event;

/// An active reservation of one spot at one local event. Cancellation
/// removes the record; there is no stored "past" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub booked_at: DateTime<Utc>,
}

/// Result of a booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingReceipt {
    Reserved(Booking),
    /// External events are booked on the vendor's site; nothing is recorded.
    Redirect { event_id: String, ticket_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingPeriod {
    Upcoming,
    Past,
}

impl BookingPeriod {
    pub fn classify(starts_at: NaiveDateTime, now: NaiveDateTime) -> Self {
        if starts_at >= now {
            BookingPeriod::Upcoming
        } else {
            BookingPeriod::Past
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "upcoming" => Some(BookingPeriod::Upcoming),
            "past" => Some(BookingPeriod::Past),
            _ => None,
        }
    }
}

/// A booking joined with its event and the period label computed at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithEvent {
    pub booking: Booking,
    pub event: Event,
    pub period: BookingPeriod,
}
