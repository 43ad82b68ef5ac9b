use std::sync::Arc;
use tracing::{debug, error};

use crate::database::models::{RecommendationFilter, RecommendationResult};
use crate::database::{CatalogStore, DatabaseError};
use crate::types::{ConcernId, ProductTypeId, SkinTypeId};

/// Turns concern / skin type (/ product type) filters into recommended products.
///
/// Holds no mutable state: one instance is built at startup and shared by
/// every request. There is no caching and no retry; a store failure is
/// returned to the caller as-is.
#[derive(Clone)]
pub struct RecommendationEngine {
    store: Arc<dyn CatalogStore>,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Products for a concern and skin type, ordered by product type
    pub async fn select_by_concern_and_skin_type(
        &self,
        concern_id: ConcernId,
        skin_type_id: SkinTypeId,
    ) -> Result<Vec<RecommendationResult>, DatabaseError> {
        self.select(RecommendationFilter::new(concern_id, skin_type_id)).await
    }

    /// Same as `select_by_concern_and_skin_type`, restricted to one product type
    pub async fn select_by_concern_skin_type_and_product_type(
        &self,
        concern_id: ConcernId,
        skin_type_id: SkinTypeId,
        product_type_id: ProductTypeId,
    ) -> Result<Vec<RecommendationResult>, DatabaseError> {
        self.select(RecommendationFilter::new(concern_id, skin_type_id).with_product_type(product_type_id))
            .await
    }

    async fn select(&self, filter: RecommendationFilter) -> Result<Vec<RecommendationResult>, DatabaseError> {
        debug!(?filter, "Selecting recommendations");
        match self.store.select_recommendations(&filter).await {
            Ok(products) => {
                debug!(count = products.len(), "Recommendation query returned");
                Ok(products)
            }
            Err(e) => {
                error!(?filter, "Recommendation query failed: {}", e);
                Err(e)
            }
        }
    }
}
