// Application state module
// Everything a request handler needs, built once at startup

use std::path::PathBuf;

use super::types::Config;
use crate::handler::static_files::StaticFileServer;
use crate::http::cache::CachePolicy;

/// Application state, shared read-only across connections
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub static_files: StaticFileServer,
}

impl AppState {
    /// Create `AppState` serving `root`
    pub fn new(config: Config, root: PathBuf) -> Self {
        let cache_policy = CachePolicy::from_immutable(config.static_files.immutable);
        Self {
            static_files: StaticFileServer::new(&root, cache_policy),
            config,
        }
    }
}
