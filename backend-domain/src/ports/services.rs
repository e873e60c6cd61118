use async_trait::async_trait;
use serde_json::Value;

use crate::entities::{Actor, CatalogSearch};

/// Third-party events catalog. Returns raw vendor records; each one is
/// normalized individually so a malformed item cannot sink the batch.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    async fn search_events(&self, request: &CatalogSearch) -> anyhow::Result<Vec<Value>>;
    async fn get_event(&self, vendor_id: &str) -> anyhow::Result<Value>;
}

/// Resolves a session credential to the acting user, if any.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_actor(&self, token: &str) -> anyhow::Result<Option<Actor>>;
}
