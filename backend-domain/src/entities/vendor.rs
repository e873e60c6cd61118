// External catalog record
// Eventbrite-style payload as returned by the catalog collaborator

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct VendorEvent {
    pub id: String,
    pub name: VendorText,
    #[serde(default)]
    pub description: Option<VendorText>,
    #[serde(default)]
    pub summary: Option<String>,
    pub start: VendorDateTime,
    #[serde(default)]
    pub venue: Option<VendorVenue>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub ticket_availability: Option<VendorTicketAvailability>,
    #[serde(default)]
    pub category: Option<VendorCategory>,
    #[serde(default)]
    pub logo: Option<VendorLogo>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub ticket_classes: Vec<VendorTicketClass>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub organizer: Option<VendorOrganizer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorDateTime {
    /// Wall-clock start at the venue, `YYYY-MM-DDTHH:MM:SS`.
    pub local: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<VendorAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorTicketAvailability {
    #[serde(default)]
    pub maximum_quantity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorCategory {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorLogo {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub original: Option<VendorImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorTicketClass {
    #[serde(default)]
    pub cost: Option<VendorCost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorCost {
    /// Minor currency units (cents).
    #[serde(default)]
    pub value: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorOrganizer {
    #[serde(default)]
    pub name: Option<String>,
}
