//! Application state shared across handlers

use std::sync::Arc;

use crate::database::CatalogStore;
use crate::services::RecommendationEngine;

/// Store handle and engine, built once at startup and cloned into each request
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn CatalogStore>,
    engine: RecommendationEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        let engine = RecommendationEngine::new(store.clone());
        Self {
            inner: Arc::new(AppStateInner { store, engine }),
        }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.inner.store.as_ref()
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.inner.engine
    }
}
