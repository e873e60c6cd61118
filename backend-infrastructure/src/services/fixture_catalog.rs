use std::path::Path;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::info;

use backend_domain::{CatalogSearch, ExternalCatalog};

/// Catalog served from a JSON array of vendor records on disk. Used for
/// offline runs and demos.
pub struct FixtureCatalog {
    records: Vec<Value>,
}

impl FixtureCatalog {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("read catalog fixture {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("parse catalog fixture {}", path.display()))?;
        let records = match value {
            Value::Array(records) => records,
            Value::Object(mut object) => match object.remove("events") {
                Some(Value::Array(records)) => records,
                _ => return Err(anyhow!("catalog fixture has no events array")),
            },
            _ => return Err(anyhow!("catalog fixture must be a JSON array")),
        };
        info!(count = records.len(), "catalog fixture loaded from {}", path.display());
        Ok(Self::new(records))
    }
}

fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn record_name(record: &Value) -> String {
    record
        .pointer("/name/text")
        .or_else(|| record.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

#[async_trait]
impl ExternalCatalog for FixtureCatalog {
    async fn search_events(&self, request: &CatalogSearch) -> Result<Vec<Value>> {
        let needle = request
            .query
            .as_deref()
            .map(|query| query.trim().to_lowercase())
            .unwrap_or_default();
        Ok(self
            .records
            .iter()
            .filter(|record| needle.is_empty() || record_name(record).contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_event(&self, vendor_id: &str) -> Result<Value> {
        self.records
            .iter()
            .find(|record| record_id(record).as_deref() == Some(vendor_id))
            .cloned()
            .ok_or_else(|| anyhow!("catalog event '{}' not found", vendor_id))
    }
}
