use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Product, RecommendationFilter, RecommendationResult, ReferenceKind, ReferenceRecord,
};
use crate::database::store::CatalogStore;
use crate::types::{ProductId, RecordId};

/// In-process `CatalogStore` with the same uniqueness, referential and join
/// rules as the Postgres schema. Backs the test suite and local demos.
#[derive(Default)]
pub struct MemoryStore {
    catalog: RwLock<Catalog>,
}

#[derive(Debug, Default)]
struct Catalog {
    references: HashMap<ReferenceKind, BTreeMap<i32, String>>,
    products: BTreeMap<i32, Product>,
}

impl Catalog {
    fn table(&self, kind: ReferenceKind) -> Option<&BTreeMap<i32, String>> {
        self.references.get(&kind)
    }

    fn label(&self, kind: ReferenceKind, id: i32) -> Option<&str> {
        self.table(kind).and_then(|t| t.get(&id)).map(String::as_str)
    }

    fn check_references(&self, product: &Product) -> Result<(), DatabaseError> {
        for kind in ReferenceKind::ALL {
            let id = kind.key_of(product);
            if self.label(kind, id).is_none() {
                return Err(DatabaseError::Conflict(format!(
                    "{} {} does not exist",
                    kind.display_name(),
                    id
                )));
            }
        }
        Ok(())
    }

    fn is_referenced(&self, kind: ReferenceKind, id: i32) -> bool {
        self.products.values().any(|p| kind.key_of(p) == id)
    }

    fn recommend(&self, filter: &RecommendationFilter) -> Vec<RecommendationResult> {
        let mut matches: Vec<(&Product, RecommendationResult)> = self
            .products
            .values()
            .filter(|p| filter.matches(p))
            .filter_map(|p| {
                // Same as the SQL inner joins: any unresolved key drops the product
                let row = RecommendationResult {
                    product_name: p.product_name.clone(),
                    all_ingredients: p.all_ingredients.clone(),
                    brand: self.label(ReferenceKind::Brand, p.brand_id)?.to_string(),
                    concern: self.label(ReferenceKind::Concern, p.concern_id)?.to_string(),
                    key_ingredients: self
                        .label(ReferenceKind::KeyIngredient, p.key_ingredients_id)?
                        .to_string(),
                    skin_type: self.label(ReferenceKind::SkinType, p.skin_type_id)?.to_string(),
                };
                Some((p, row))
            })
            .collect();

        matches.sort_by_key(|(p, _)| (p.product_type_id, p.product_id));
        matches.into_iter().map(|(_, row)| row).collect()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>, DatabaseError> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .table(kind)
            .map(|t| t.iter().map(|(id, label)| ReferenceRecord::new(*id, label.clone())).collect())
            .unwrap_or_default())
    }

    async fn create_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError> {
        let mut catalog = self.catalog.write().await;
        let table = catalog.references.entry(kind).or_default();
        if table.contains_key(&record.id) {
            return Err(DatabaseError::Conflict(format!(
                "{} {} already exists",
                kind.display_name(),
                record.id
            )));
        }
        table.insert(record.id, record.label.clone());
        Ok(record)
    }

    async fn update_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError> {
        let mut catalog = self.catalog.write().await;
        match catalog.references.get_mut(&kind).and_then(|t| t.get_mut(&record.id)) {
            Some(label) => {
                *label = record.label.clone();
                Ok(record)
            }
            None => Err(DatabaseError::NotFound(format!(
                "{} {} not found",
                kind.display_name(),
                record.id
            ))),
        }
    }

    async fn delete_reference(&self, kind: ReferenceKind, id: RecordId) -> Result<(), DatabaseError> {
        let mut catalog = self.catalog.write().await;
        if catalog.label(kind, id.get()).is_none() {
            return Err(DatabaseError::NotFound(format!("{} {} not found", kind.display_name(), id)));
        }
        if catalog.is_referenced(kind, id.get()) {
            return Err(DatabaseError::Conflict(format!(
                "{} {} is still referenced by a product",
                kind.display_name(),
                id
            )));
        }
        if let Some(table) = catalog.references.get_mut(&kind) {
            table.remove(&id.get());
        }
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, DatabaseError> {
        let catalog = self.catalog.read().await;
        Ok(catalog.products.values().cloned().collect())
    }

    async fn create_product(&self, product: Product) -> Result<Product, DatabaseError> {
        let mut catalog = self.catalog.write().await;
        if catalog.products.contains_key(&product.product_id) {
            return Err(DatabaseError::Conflict(format!(
                "Product {} already exists",
                product.product_id
            )));
        }
        catalog.check_references(&product)?;
        catalog.products.insert(product.product_id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, product: Product) -> Result<Product, DatabaseError> {
        let mut catalog = self.catalog.write().await;
        if !catalog.products.contains_key(&product.product_id) {
            return Err(DatabaseError::NotFound(format!(
                "Product {} not found",
                product.product_id
            )));
        }
        catalog.check_references(&product)?;
        catalog.products.insert(product.product_id, product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), DatabaseError> {
        let mut catalog = self.catalog.write().await;
        catalog
            .products
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("Product {} not found", id)))
    }

    async fn select_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> Result<Vec<RecommendationResult>, DatabaseError> {
        let catalog = self.catalog.read().await;
        Ok(catalog.recommend(filter))
    }
}
