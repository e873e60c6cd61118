// Event normalizer
// Maps one external catalog record onto the canonical Event shape

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::entities::{Event, EventOrigin, VendorEvent, VendorVenue};
use crate::value_objects::{external_event_id, EventType};

pub const DEFAULT_EXTERNAL_CAPACITY: u32 = 999;
pub const ONLINE_EVENT_LOCATION: &str = "Online Event";
pub const UNADDRESSED_LOCATION: &str = "Location TBD";
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?w=400&h=200&fit=crop";

const NO_DESCRIPTION: &str = "No description available";
const DEFAULT_ORGANIZER: &str = "External Organizer";
const FREE_PRICE: &str = "Free";
const UNKNOWN_PRICE: &str = "See Event Page";

/// Vendor category name to local type. Anything absent maps to `Other`.
const CATEGORY_TABLE: &[(&str, EventType)] = &[
    ("Business & Professional", EventType::Conference),
    ("Music", EventType::Concert),
    ("Arts & Culture", EventType::Exhibition),
    ("Community & Culture", EventType::Workshop),
    ("Education", EventType::Workshop),
    ("Fashion & Beauty", EventType::Exhibition),
    ("Film, Media & Entertainment", EventType::Exhibition),
    ("Food & Drink", EventType::Workshop),
    ("Government & Politics", EventType::Conference),
    ("Health & Wellness", EventType::Workshop),
    ("Hobbies & Special Interest", EventType::Workshop),
    ("Home & Lifestyle", EventType::Workshop),
    ("Performing & Visual Arts", EventType::Exhibition),
    ("Religion & Spirituality", EventType::Workshop),
    ("School Activities", EventType::Workshop),
    ("Science & Technology", EventType::Conference),
    ("Sports & Fitness", EventType::Workshop),
    ("Travel & Outdoor", EventType::Workshop),
];

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed vendor record: {0}")]
    Malformed(String),
    #[error("vendor event '{0}' has no name")]
    MissingName(String),
    #[error("vendor event '{id}' has unparseable start '{value}'")]
    InvalidStart { id: String, value: String },
}

/// Outcome of normalizing a catalog page. Skipped items are reported,
/// never propagated.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub events: Vec<Event>,
    pub skipped: Vec<NormalizeError>,
}

pub fn normalize_batch(records: &[Value]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for record in records {
        match normalize_value(record) {
            Ok(event) => batch.events.push(event),
            Err(err) => batch.skipped.push(err),
        }
    }
    batch
}

pub fn normalize_value(record: &Value) -> Result<Event, NormalizeError> {
    let vendor = VendorEvent::deserialize(record)
        .map_err(|err| NormalizeError::Malformed(err.to_string()))?;
    normalize(&vendor)
}

pub fn normalize(record: &VendorEvent) -> Result<Event, NormalizeError> {
    let vendor_id = record.id.trim();
    if vendor_id.is_empty() {
        return Err(NormalizeError::Malformed("missing id".to_string()));
    }
    let name = non_blank(record.name.text.as_deref())
        .ok_or_else(|| NormalizeError::MissingName(vendor_id.to_string()))?;
    let start = parse_vendor_start(&record.start.local).ok_or_else(|| {
        NormalizeError::InvalidStart {
            id: vendor_id.to_string(),
            value: record.start.local.clone(),
        }
    })?;
    let capacity = record
        .capacity
        .filter(|capacity| *capacity > 0)
        .unwrap_or(DEFAULT_EXTERNAL_CAPACITY);

    Ok(Event {
        id: external_event_id(vendor_id),
        name,
        description: describe(record),
        date: start.date(),
        time: truncate_to_minute(start.time()),
        location: format_location(record.venue.as_ref()),
        capacity,
        event_type: map_category(
            record
                .category
                .as_ref()
                .and_then(|category| category.name.as_deref()),
        ),
        image: Some(select_image(record)),
        price: Some(format_price(record)),
        origin: EventOrigin::External {
            external_id: vendor_id.to_string(),
            organizer: non_blank(
                record
                    .organizer
                    .as_ref()
                    .and_then(|organizer| organizer.name.as_deref()),
            )
            .unwrap_or_else(|| DEFAULT_ORGANIZER.to_string()),
            ticket_url: non_blank(record.url.as_deref()),
            estimated_attendees: estimate_attendees(record),
        },
    })
}

pub fn map_category(category: Option<&str>) -> EventType {
    let Some(category) = category.map(str::trim) else {
        return EventType::Other;
    };
    CATEGORY_TABLE
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, event_type)| *event_type)
        .unwrap_or(EventType::Other)
}

pub fn format_location(venue: Option<&VendorVenue>) -> String {
    let Some(venue) = venue else {
        return ONLINE_EVENT_LOCATION.to_string();
    };
    let address = venue.address.as_ref();
    let parts = [
        non_blank(venue.name.as_deref()),
        non_blank(address.and_then(|address| address.city.as_deref())),
        non_blank(address.and_then(|address| address.region.as_deref())),
    ];
    let joined = parts.into_iter().flatten().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        UNADDRESSED_LOCATION.to_string()
    } else {
        joined
    }
}

/// Only derivable from vendor inventory; `None` means unknown.
pub fn estimate_attendees(record: &VendorEvent) -> Option<u32> {
    let capacity = record.capacity.filter(|capacity| *capacity > 0)?;
    let remaining = record
        .ticket_availability
        .as_ref()
        .and_then(|availability| availability.maximum_quantity)?;
    Some(capacity.saturating_sub(remaining))
}

pub fn format_price(record: &VendorEvent) -> String {
    if record.is_free {
        return FREE_PRICE.to_string();
    }
    let prices = record
        .ticket_classes
        .iter()
        .filter_map(|class| class.cost.as_ref().map(|cost| cost.value))
        .filter(|cents| *cents > 0)
        .collect::<Vec<_>>();
    match (prices.iter().min(), prices.iter().max()) {
        (Some(min), Some(max)) if min == max => format_cents(*min),
        (Some(min), Some(max)) => format!("{} - {}", format_cents(*min), format_cents(*max)),
        _ => UNKNOWN_PRICE.to_string(),
    }
}

fn select_image(record: &VendorEvent) -> String {
    let logo = record.logo.as_ref();
    non_blank(logo.and_then(|logo| logo.url.as_deref()))
        .or_else(|| {
            non_blank(
                logo.and_then(|logo| logo.original.as_ref())
                    .and_then(|original| original.url.as_deref()),
            )
        })
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
}

fn describe(record: &VendorEvent) -> String {
    non_blank(
        record
            .description
            .as_ref()
            .and_then(|description| description.text.as_deref()),
    )
    .or_else(|| non_blank(record.summary.as_deref()))
    .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

fn parse_vendor_start(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn format_cents(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}
