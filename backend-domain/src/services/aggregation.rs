// Aggregation and filtering engine
// Merges local and normalized external events into the read-side view

use crate::entities::{Event, EventQuery};
use crate::value_objects::Scope;

/// Applies scope, then search and type filters. Local events keep their
/// insertion order and external events are appended after them; no other
/// ordering is promised.
pub fn aggregate_events(
    local: Vec<Event>,
    external: Vec<Event>,
    query: &EventQuery,
    home_region: &str,
) -> Vec<Event> {
    let needle = query.search.to_lowercase();
    select_scope(local, external, query.scope, home_region)
        .into_iter()
        .filter(|event| matches_search(event, &needle))
        .filter(|event| query.type_filter.matches(event.event_type))
        .collect()
}

fn select_scope(
    local: Vec<Event>,
    external: Vec<Event>,
    scope: Scope,
    home_region: &str,
) -> Vec<Event> {
    let local = local.into_iter().filter(|event| !event.is_external());
    match scope {
        Scope::All => local
            .chain(external.into_iter().filter(Event::is_external))
            .collect(),
        Scope::Community => local.collect(),
        Scope::Nearby => {
            let region = home_region.trim().to_lowercase();
            local
                .filter(|event| {
                    !region.is_empty() && event.location.to_lowercase().contains(&region)
                })
                .collect()
        }
    }
}

/// `needle` must already be lowercased. It is matched as given, surrounding
/// whitespace included; empty matches all.
fn matches_search(event: &Event, needle: &str) -> bool {
    needle.is_empty()
        || event.name.to_lowercase().contains(needle)
        || event.description.to_lowercase().contains(needle)
}
