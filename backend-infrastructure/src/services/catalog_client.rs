use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use backend_domain::{CatalogSearch, ExternalCatalog};

const SEARCH_EXPAND: &str = "venue,ticket_availability,logo";
const DETAIL_EXPAND: &str = "venue,ticket_availability,logo,organizer";

const LOCATION_ALIASES: &[(&str, &str)] = &[
    ("louisville", "Louisville, KY"),
    ("lexington", "Lexington, KY"),
    ("cincinnati", "Cincinnati, OH"),
    ("nashville", "Nashville, TN"),
    ("indianapolis", "Indianapolis, IN"),
    ("chicago", "Chicago, IL"),
    ("new york", "New York, NY"),
    ("los angeles", "Los Angeles, CA"),
    ("san francisco", "San Francisco, CA"),
    ("atlanta", "Atlanta, GA"),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog responded with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("catalog response has no events array")]
    MissingEvents,
}

/// Expands a bare city name to the "City, ST" form the catalog expects.
pub fn resolve_location_alias(location: &str) -> String {
    let key = location.trim().to_lowercase();
    LOCATION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, resolved)| resolved.to_string())
        .unwrap_or_else(|| location.trim().to_string())
}

/// Query string for `/events/search/`. Empty values are left out.
pub fn search_params(request: &CatalogSearch, range_start: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("location.address", resolve_location_alias(&request.location)),
        ("expand", SEARCH_EXPAND.to_string()),
        (
            "sort_by",
            request.sort_by.clone().unwrap_or_else(|| "date".to_string()),
        ),
        ("start_date.range_start", range_start.to_string()),
    ];
    let optional = [
        ("location.within", &request.within),
        ("q", &request.query),
        ("categories", &request.category),
    ];
    for (key, value) in optional {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            params.push((key, value.to_string()));
        }
    }
    params.retain(|(_, value)| !value.is_empty());
    params
}

/// Vendor event ids are numeric strings; anything else never reaches the URL.
pub fn valid_vendor_id(vendor_id: &str) -> bool {
    !vendor_id.is_empty() && vendor_id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Catalog backed by the vendor REST API.
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(3)))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("error_description")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(body);
            warn!(status = status.as_u16(), "catalog request to {} failed", path);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                detail,
            }
            .into());
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl ExternalCatalog for HttpCatalogClient {
    async fn search_events(&self, request: &CatalogSearch) -> Result<Vec<Value>> {
        let range_start = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let params = search_params(request, &range_start);
        let body = self.get_json("/events/search/", &params).await?;
        let events = match body.get("events") {
            Some(Value::Array(events)) => events.clone(),
            _ => return Err(CatalogError::MissingEvents.into()),
        };
        debug!(count = events.len(), "catalog search returned");
        Ok(events)
    }

    async fn get_event(&self, vendor_id: &str) -> Result<Value> {
        if !valid_vendor_id(vendor_id) {
            return Err(anyhow!("invalid vendor event id '{}'", vendor_id));
        }
        let params = [("expand", DETAIL_EXPAND.to_string())];
        self.get_json(&format!("/events/{}/", vendor_id), &params)
            .await
    }
}

/// Used when no catalog is configured: listings carry no external events and
/// external detail lookups fail.
#[derive(Default)]
pub struct DisabledCatalog;

#[async_trait]
impl ExternalCatalog for DisabledCatalog {
    async fn search_events(&self, _request: &CatalogSearch) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn get_event(&self, vendor_id: &str) -> Result<Value> {
        Err(anyhow!(
            "external catalog is not configured; cannot load '{}'",
            vendor_id
        ))
    }
}
