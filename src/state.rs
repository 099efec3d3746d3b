use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::cache::PageCache;
use crate::config::AppConfig;
use crate::database::ContentStore;
use crate::storage::ObjectStorage;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ContentStore>,
    pub cache: Arc<PageCache>,
    /// `None` when the auth URL or anon key is missing; every admin request is then rejected
    pub auth: Option<Arc<dyn AuthProvider>>,
    /// `None` when the storage URL or service key is missing; uploads then fail
    pub storage: Option<Arc<dyn ObjectStorage>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn ContentStore>) -> Self {
        let cache = PageCache::new(&config.cache);
        Self {
            config: Arc::new(config),
            store,
            cache: Arc::new(cache),
            auth: None,
            storage: None,
        }
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }
}
