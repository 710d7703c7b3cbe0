use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::store::ConfigStore;
use crate::stylist::random::RandomSource;
use crate::stylist::session::SessionRegistry;
use crate::stylist::{ScriptedStylist, Stylist};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ConfigStore>>,
    pub catalog: Arc<Catalog>,
    /// Pluggable reply backend. Default: ScriptedStylist.
    pub stylist: Arc<dyn Stylist>,
    pub sessions: Arc<SessionRegistry>,
    /// Drives reply jitter; the stylist holds its own handle for text and product picks.
    pub rng: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(config: &Config, rng: Arc<dyn RandomSource>) -> Self {
        let catalog = Arc::new(Catalog::default());
        let stylist = Arc::new(ScriptedStylist::new(Arc::clone(&catalog), Arc::clone(&rng)));
        AppState {
            store: Arc::new(RwLock::new(ConfigStore::seeded(config))),
            catalog,
            stylist,
            sessions: Arc::new(SessionRegistry::with_idle_ttl(Duration::from_secs(
                config.session_idle_secs,
            ))),
            rng,
        }
    }
}
