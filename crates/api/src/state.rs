use std::sync::Arc;

use kontrola_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store handle and the config are both behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Hosted store handle (possibly unconfigured).
    pub store: Store,
    /// Server configuration (admin secret, CORS origins, store settings).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
