use std::sync::Arc;

use makrx_core::validation::RuleCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind `Arc` and is read-only after
/// startup.
#[derive(Clone)]
pub struct AppState {
    /// Rule sets for every form served by this instance.
    pub catalog: Arc<RuleCatalog>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(catalog: RuleCatalog, config: ServerConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
