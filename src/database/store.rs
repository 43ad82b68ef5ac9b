use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Product, RecommendationFilter, RecommendationResult, ReferenceKind, ReferenceRecord,
};
use crate::types::{ProductId, RecordId};

/// Everything the HTTP layer and the recommendation engine need from storage.
///
/// Built once at startup and injected through `AppState`; implementations hold
/// no per-request state. Writes enforce identifier uniqueness and referential
/// integrity; reads never return partial results on failure.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap round trip used by `/health`
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>, DatabaseError>;

    async fn create_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError>;

    /// Replace the label of an existing row; `NotFound` if the id is unknown
    async fn update_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError>;

    /// `Conflict` while any product still points at the row
    async fn delete_reference(&self, kind: ReferenceKind, id: RecordId) -> Result<(), DatabaseError>;

    async fn list_products(&self) -> Result<Vec<Product>, DatabaseError>;

    async fn create_product(&self, product: Product) -> Result<Product, DatabaseError>;

    /// Full replacement keyed by `product.product_id`
    async fn update_product(&self, product: Product) -> Result<Product, DatabaseError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), DatabaseError>;

    /// Products matching `filter`, joined to their labels, ordered by product type
    async fn select_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> Result<Vec<RecommendationResult>, DatabaseError>;
}
