// Read-side query shapes

use crate::value_objects::{Scope, TypeFilter};

/// Listing request applied by the aggregation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub scope: Scope,
    pub search: String,
    pub type_filter: TypeFilter,
}

/// Search request sent to the external catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSearch {
    pub location: String,
    pub within: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
}
