// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::resolver::Resolver;

/// Application state
pub struct AppState {
    pub config: Config,
    pub resolver: Resolver,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver =
            Resolver::new(&config.assets.root).with_index(config.assets.index_document());
        Self { config, resolver }
    }

    pub fn shared(config: Config) -> Arc<Self> {
        Arc::new(Self::new(config))
    }
}
