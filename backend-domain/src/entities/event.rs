// Event entity
// One canonical record for locally-created and catalog-sourced events

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DomainError;
use crate::value_objects::EventType;

/// Where an event comes from. Only local events are booking-backed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum EventOrigin {
    Local {
        organizer: String,
        organizer_id: String,
        attendees: u32,
    },
    External {
        external_id: String,
        organizer: String,
        /// `None` when the vendor record has no usable URL.
        ticket_url: Option<String>,
        /// `None` when the vendor gives no inventory data.
        estimated_attendees: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub capacity: u32,
    pub event_type: EventType,
    pub image: Option<String>,
    pub price: Option<String>,
    pub origin: EventOrigin,
}

impl Event {
    pub fn local(id: String, fields: EventFields, organizer_id: &str, organizer: &str) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            date: fields.date,
            time: fields.time,
            location: fields.location,
            capacity: fields.capacity,
            event_type: fields.event_type,
            image: fields.image,
            price: fields.price,
            origin: EventOrigin::Local {
                organizer: organizer.to_string(),
                organizer_id: organizer_id.to_string(),
                attendees: 0,
            },
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self.origin, EventOrigin::External { .. })
    }

    pub fn attendees(&self) -> Option<u32> {
        match &self.origin {
            EventOrigin::Local { attendees, .. } => Some(*attendees),
            EventOrigin::External {
                estimated_attendees,
                ..
            } => *estimated_attendees,
        }
    }

    pub fn organizer(&self) -> &str {
        match &self.origin {
            EventOrigin::Local { organizer, .. } | EventOrigin::External { organizer, .. } => {
                organizer
            }
        }
    }

    pub fn organizer_id(&self) -> Option<&str> {
        match &self.origin {
            EventOrigin::Local { organizer_id, .. } => Some(organizer_id),
            EventOrigin::External { .. } => None,
        }
    }

    pub fn ticket_url(&self) -> Option<&str> {
        match &self.origin {
            EventOrigin::External { ticket_url, .. } => ticket_url.as_deref(),
            EventOrigin::Local { .. } => None,
        }
    }

    /// Scheduled instant, always derived from the stored date and time.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_full(&self) -> bool {
        match &self.origin {
            EventOrigin::Local { attendees, .. } => *attendees >= self.capacity,
            EventOrigin::External { .. } => false,
        }
    }
}

/// Validated event fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub capacity: u32,
    pub event_type: EventType,
    pub image: Option<String>,
    pub price: Option<String>,
}

/// Create request as submitted by an organizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_capacity")]
    pub capacity: Option<i64>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<EventFields, DomainError> {
        let capacity = self
            .capacity
            .ok_or_else(|| DomainError::validation("capacity is required"))?;
        Ok(EventFields {
            name: required_text(&self.name, "name")?,
            description: required_text(&self.description, "description")?,
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            location: required_text(&self.location, "location")?,
            capacity: parse_capacity(capacity)?,
            event_type: parse_event_type(self.event_type.as_deref())?,
            image: optional_text(self.image.as_deref()),
            price: optional_text(self.price.as_deref()),
        })
    }
}

/// Partial update. Has no field for attendees, organizer or origin;
/// such keys in a request body are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_capacity")]
    pub capacity: Option<i64>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

impl EventPatch {
    /// Applies the patch to a local event. Every field is validated before
    /// anything is written, so a rejected patch leaves `event` untouched.
    pub fn apply_to(&self, event: &mut Event) -> Result<(), DomainError> {
        let EventOrigin::Local { attendees, .. } = &event.origin else {
            return Err(DomainError::Forbidden(
                "external events are read-only".to_string(),
            ));
        };
        let attendees = *attendees;

        let name = self
            .name
            .as_deref()
            .map(|value| required_text(value, "name"))
            .transpose()?;
        let description = self
            .description
            .as_deref()
            .map(|value| required_text(value, "description"))
            .transpose()?;
        let date = self.date.as_deref().map(parse_date).transpose()?;
        let time = self.time.as_deref().map(parse_time).transpose()?;
        let location = self
            .location
            .as_deref()
            .map(|value| required_text(value, "location"))
            .transpose()?;
        let capacity = self.capacity.map(parse_capacity).transpose()?;
        if let Some(capacity) = capacity {
            if capacity < attendees {
                return Err(DomainError::Conflict(format!(
                    "capacity {} is below current attendance of {}",
                    capacity, attendees
                )));
            }
        }
        let event_type = match self.event_type.as_deref() {
            Some(raw) => Some(parse_event_type(Some(raw))?),
            None => None,
        };

        if let Some(name) = name {
            event.name = name;
        }
        if let Some(description) = description {
            event.description = description;
        }
        if let Some(date) = date {
            event.date = date;
        }
        if let Some(time) = time {
            event.time = time;
        }
        if let Some(location) = location {
            event.location = location;
        }
        if let Some(capacity) = capacity {
            event.capacity = capacity;
        }
        if let Some(event_type) = event_type {
            event.event_type = event_type;
        }
        if let Some(image) = self.image.as_deref() {
            event.image = optional_text(Some(image));
        }
        if let Some(price) = self.price.as_deref() {
            event.price = optional_text(Some(price));
        }
        Ok(())
    }
}

fn required_text(value: &str, field: &str) -> Result<String, DomainError> {
    optional_text(Some(value))
        .ok_or_else(|| DomainError::validation(format!("{} must not be empty", field)))
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        DomainError::validation(format!("date '{}' must be YYYY-MM-DD", value.trim()))
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, DomainError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| DomainError::validation(format!("time '{}' must be HH:MM", trimmed)))
}

fn parse_capacity(value: i64) -> Result<u32, DomainError> {
    if value <= 0 {
        return Err(DomainError::validation("capacity must be greater than 0"));
    }
    u32::try_from(value)
        .map_err(|_| DomainError::validation(format!("capacity {} is too large", value)))
}

/// Form submissions send numbers as strings, so `"40"` is accepted as well
/// as `40`. A blank string counts as absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum CapacityInput {
    Number(i64),
    Text(String),
}

fn deserialize_capacity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<CapacityInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(CapacityInput::Number(value)) => Ok(Some(value)),
        Some(CapacityInput::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>().map(Some).map_err(|_| {
                D::Error::custom(format!("capacity '{}' is not a whole number", trimmed))
            })
        }
    }
}

fn parse_event_type(value: Option<&str>) -> Result<EventType, DomainError> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(EventType::Other),
        Some(raw) => EventType::parse(raw)
            .ok_or_else(|| DomainError::validation(format!("unknown event type '{}'", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            name: "Community Garden Workshop".to_string(),
            description: "Learn organic gardening".to_string(),
            date: "2025-09-10".to_string(),
            time: "10:00".to_string(),
            location: "Community Center, Falmouth KY".to_string(),
            capacity: Some(30),
            event_type: Some("Workshop".to_string()),
            image: Some("  ".to_string()),
            price: None,
        }
    }

    fn local_event(attendees: u32) -> Event {
        let mut event = Event::local(
            "evt-1".to_string(),
            draft().validate().expect("valid draft"),
            "user-1",
            "Garden Club",
        );
        if let EventOrigin::Local { attendees: count, .. } = &mut event.origin {
            *count = attendees;
        }
        event
    }

    #[test]
    fn draft_validation_trims_and_parses() {
        let fields = draft().validate().expect("valid draft");
        assert_eq!(fields.capacity, 30);
        assert_eq!(fields.event_type, EventType::Workshop);
        assert_eq!(fields.time, NaiveTime::from_hms_opt(10, 0, 0).expect("time"));
        assert!(fields.image.is_none());
    }

    #[test]
    fn draft_validation_rejects_missing_or_malformed_fields() {
        let mut missing_name = draft();
        missing_name.name = "   ".to_string();
        let err = missing_name.validate().expect_err("reject blank name");
        match err {
            DomainError::Validation(message) => assert!(message.contains("name")),
            _ => panic!("unexpected error type"),
        }

        let mut zero_capacity = draft();
        zero_capacity.capacity = Some(0);
        assert!(matches!(
            zero_capacity.validate(),
            Err(DomainError::Validation(_))
        ));

        let mut no_capacity = draft();
        no_capacity.capacity = None;
        assert!(matches!(no_capacity.validate(), Err(DomainError::Validation(_))));

        let mut bad_date = draft();
        bad_date.date = "10/09/2025".to_string();
        assert!(matches!(bad_date.validate(), Err(DomainError::Validation(_))));

        let mut bad_type = draft();
        bad_type.event_type = Some("Rave".to_string());
        assert!(matches!(bad_type.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn new_local_event_starts_empty() {
        let event = local_event(0);
        assert!(!event.is_external());
        assert_eq!(event.attendees(), Some(0));
        assert_eq!(event.organizer_id(), Some("user-1"));
        assert_eq!(
            event.starts_at(),
            NaiveDate::from_ymd_opt(2025, 9, 10)
                .expect("date")
                .and_hms_opt(10, 0, 0)
                .expect("datetime")
        );
    }

    #[test]
    fn patch_recomputes_schedule_and_keeps_attendance() {
        let mut event = local_event(4);
        let patch = EventPatch {
            date: Some("2025-10-01".to_string()),
            time: Some("18:30".to_string()),
            capacity: Some(10),
            ..EventPatch::default()
        };
        patch.apply_to(&mut event).expect("apply patch");
        assert_eq!(event.attendees(), Some(4));
        assert_eq!(event.capacity, 10);
        assert_eq!(
            event.starts_at().format("%Y-%m-%d %H:%M").to_string(),
            "2025-10-01 18:30"
        );
    }

    #[test]
    fn patch_below_attendance_is_a_conflict_and_changes_nothing() {
        let mut event = local_event(5);
        let before = event.clone();
        let patch = EventPatch {
            name: Some("Renamed".to_string()),
            capacity: Some(3),
            ..EventPatch::default()
        };
        let err = patch.apply_to(&mut event).expect_err("reject shrink");
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(event, before);
    }

    #[test]
    fn patch_ignores_unknown_keys_from_json() {
        let body = r#"{"attendees": 99, "organizerId": "x", "isExternal": true, "name": "New"}"#;
        let patch: EventPatch = serde_json::from_str(body).expect("deserialize patch");
        let mut event = local_event(2);
        patch.apply_to(&mut event).expect("apply patch");
        assert_eq!(event.name, "New");
        assert_eq!(event.attendees(), Some(2));
        assert_eq!(event.organizer_id(), Some("user-1"));
        assert!(!event.is_external());
    }

    #[test]
    fn capacity_accepts_numeric_strings_from_forms() {
        let patch: EventPatch =
            serde_json::from_str(r#"{"capacity": "40"}"#).expect("deserialize patch");
        assert_eq!(patch.capacity, Some(40));
        let mut event = local_event(2);
        patch.apply_to(&mut event).expect("apply patch");
        assert_eq!(event.capacity, 40);

        let draft: EventDraft =
            serde_json::from_str(r#"{"capacity": " 25 "}"#).expect("deserialize draft");
        assert_eq!(draft.capacity, Some(25));
        let blank: EventPatch =
            serde_json::from_str(r#"{"capacity": ""}"#).expect("deserialize blank");
        assert_eq!(blank.capacity, None);
        let numeric: EventPatch =
            serde_json::from_str(r#"{"capacity": 12}"#).expect("deserialize number");
        assert_eq!(numeric.capacity, Some(12));
    }

    #[test]
    fn capacity_rejects_non_numeric_strings() {
        let result = serde_json::from_str::<EventPatch>(r#"{"capacity": "forty"}"#);
        let err = result.expect_err("reject text capacity");
        assert!(err.to_string().contains("not a whole number"));
    }
}
