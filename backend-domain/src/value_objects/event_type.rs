// Event category value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Workshop,
    Conference,
    Concert,
    Exhibition,
    Meetup,
    Seminar,
    Festival,
    Sports,
    #[serde(rename = "Food & Drink")]
    FoodAndDrink,
    #[serde(rename = "Arts & Culture")]
    ArtsAndCulture,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 11] = [
        EventType::Workshop,
        EventType::Conference,
        EventType::Concert,
        EventType::Exhibition,
        EventType::Meetup,
        EventType::Seminar,
        EventType::Festival,
        EventType::Sports,
        EventType::FoodAndDrink,
        EventType::ArtsAndCulture,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Workshop => "Workshop",
            EventType::Conference => "Conference",
            EventType::Concert => "Concert",
            EventType::Exhibition => "Exhibition",
            EventType::Meetup => "Meetup",
            EventType::Seminar => "Seminar",
            EventType::Festival => "Festival",
            EventType::Sports => "Sports",
            EventType::FoodAndDrink => "Food & Drink",
            EventType::ArtsAndCulture => "Arts & Culture",
            EventType::Other => "Other",
        }
    }

    /// Strict, case-insensitive parse. Unknown names are rejected rather
    /// than folded into `Other`.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        EventType::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
