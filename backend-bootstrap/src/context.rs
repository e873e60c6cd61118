use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use backend_application::{AppState, Metrics};
use backend_domain::ExternalCatalog;
use backend_infrastructure::{
    AppConfig, DisabledCatalog, FixtureCatalog, HttpCatalogClient, InMemoryStore,
    StaticIdentityProvider,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let store = match &config.data_path {
            Some(path) => Arc::new(InMemoryStore::open(path).await?),
            None => {
                warn!("data_path not set; events and bookings are kept in memory only");
                Arc::new(InMemoryStore::new())
            }
        };

        let identity = StaticIdentityProvider::from_entries(&config.identities)?;
        if identity.is_empty() {
            warn!("no identities configured; every write endpoint will answer 401");
        }

        let catalog = build_catalog(config).await?;

        let state = AppState {
            config: runtime_config,
            event_store: store.clone(),
            ledger: store,
            catalog,
            identity: Arc::new(identity),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

async fn build_catalog(config: &AppConfig) -> Result<Arc<dyn ExternalCatalog>> {
    if let Some(url) = &config.catalog_url {
        info!("external catalog at {}", url);
        let client = HttpCatalogClient::new(
            url,
            config.catalog_token.clone(),
            config.request_timeout_seconds,
        )?;
        return Ok(Arc::new(client));
    }
    if let Some(path) = &config.catalog_fixture_path {
        return Ok(Arc::new(FixtureCatalog::load(Path::new(path)).await?));
    }
    info!("no external catalog configured; listings show local events only");
    Ok(Arc::new(DisabledCatalog))
}
