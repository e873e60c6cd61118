// Listing scope and type filter value objects

use serde::{Deserialize, Serialize};

use super::EventType;

/// Source set selected before search/type filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Community,
    Nearby,
}

impl Scope {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "all" => Some(Scope::All),
            "community" => Some(Scope::Community),
            "nearby" => Some(Scope::Nearby),
            _ => None,
        }
    }

    pub fn includes_external(&self) -> bool {
        matches!(self, Scope::All)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventType),
}

impl TypeFilter {
    /// `all` (or empty) is the match-everything sentinel.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Some(TypeFilter::All);
        }
        EventType::parse(trimmed).map(TypeFilter::Only)
    }

    pub fn matches(&self, event_type: EventType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == event_type,
        }
    }
}
