use std::sync::Arc;

use backend_domain::ports::{BookingLedger, EventStore, ExternalCatalog, IdentityProvider};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub event_store: Arc<dyn EventStore>,
    pub ledger: Arc<dyn BookingLedger>,
    pub catalog: Arc<dyn ExternalCatalog>,
    pub identity: Arc<dyn IdentityProvider>,
    pub metrics: Arc<Metrics>,
}
