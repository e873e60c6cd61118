// Shared fixtures for application tests

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::{json, Value};

use backend_domain::{Actor, CatalogSearch, EventDraft, ExternalCatalog, Role, RuntimeConfig};
use backend_infrastructure::{InMemoryStore, StaticIdentityProvider};

use crate::{AppState, Metrics};

pub struct StubCatalog {
    pub records: Vec<Value>,
    pub fail: bool,
}

#[async_trait]
impl ExternalCatalog for StubCatalog {
    async fn search_events(&self, _request: &CatalogSearch) -> anyhow::Result<Vec<Value>> {
        if self.fail {
            return Err(anyhow!("catalog offline"));
        }
        Ok(self.records.clone())
    }

    async fn get_event(&self, vendor_id: &str) -> anyhow::Result<Value> {
        if self.fail {
            return Err(anyhow!("catalog offline"));
        }
        self.records
            .iter()
            .find(|record| record["id"] == vendor_id)
            .cloned()
            .ok_or_else(|| anyhow!("no such vendor event"))
    }
}

pub fn vendor_records() -> Vec<Value> {
    vec![
        json!({
            "id": "101",
            "name": {"text": "Jazz Festival"},
            "start": {"local": "2030-07-04T18:30:00"},
            "category": {"name": "Music"},
            "url": "https://tickets.example/101"
        }),
        json!({"id": "broken"}),
    ]
}

pub fn state_with_catalog(catalog: StubCatalog) -> AppState {
    let store = Arc::new(InMemoryStore::new());
    AppState {
        config: RuntimeConfig::default(),
        event_store: store.clone(),
        ledger: store,
        catalog: Arc::new(catalog),
        identity: Arc::new(StaticIdentityProvider::default()),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn state() -> AppState {
    state_with_catalog(StubCatalog {
        records: vendor_records(),
        fail: false,
    })
}

pub fn organizer() -> Actor {
    Actor::new("org-1", "Garden Club", Role::Organizer)
}

pub fn attendee(id: &str) -> Actor {
    Actor::new(id, format!("attendee {id}"), Role::Attendee)
}

pub fn draft(name: &str, date: &str, capacity: i64) -> EventDraft {
    EventDraft {
        name: name.to_string(),
        description: "Hands-on session".to_string(),
        date: date.to_string(),
        time: "10:00".to_string(),
        location: "Community Center, Falmouth KY".to_string(),
        capacity: Some(capacity),
        event_type: Some("Workshop".to_string()),
        ..EventDraft::default()
    }
}
