// Identifier value objects

use uuid::Uuid;

/// Namespace for ids of events sourced from the external catalog.
/// Local ids are v4 UUIDs and can never start with it.
pub const EXTERNAL_ID_PREFIX: &str = "external-";

pub fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn new_booking_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn external_event_id(vendor_id: &str) -> String {
    format!("{}{}", EXTERNAL_ID_PREFIX, vendor_id)
}

/// Returns the vendor id when `event_id` lives in the external namespace.
pub fn vendor_id_of(event_id: &str) -> Option<&str> {
    event_id
        .strip_prefix(EXTERNAL_ID_PREFIX)
        .filter(|vendor_id| !vendor_id.is_empty())
}
