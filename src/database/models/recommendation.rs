use serde::Serialize;
use sqlx::FromRow;

use super::product::Product;
use crate::types::{ConcernId, ProductTypeId, SkinTypeId};

/// Denormalized product with its foreign keys resolved to labels.
/// Only labels leave the service; identifiers are never part of this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct RecommendationResult {
    pub product_name: String,
    pub all_ingredients: String,
    pub brand: String,
    pub concern: String,
    pub key_ingredients: String,
    pub skin_type: String,
}

/// Conjunctive filter over `Products`: concern and skin type always, product type optionally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationFilter {
    pub concern_id: ConcernId,
    pub skin_type_id: SkinTypeId,
    pub product_type_id: Option<ProductTypeId>,
}

impl RecommendationFilter {
    pub fn new(concern_id: ConcernId, skin_type_id: SkinTypeId) -> Self {
        Self {
            concern_id,
            skin_type_id,
            product_type_id: None,
        }
    }

    pub fn with_product_type(mut self, product_type_id: ProductTypeId) -> Self {
        self.product_type_id = Some(product_type_id);
        self
    }

    /// Whether a product's own keys satisfy every conjunct (joins not considered)
    pub fn matches(&self, product: &Product) -> bool {
        product.concern_id == self.concern_id.get()
            && product.skin_type_id == self.skin_type_id.get()
            && self
                .product_type_id
                .map_or(true, |pt| product.product_type_id == pt.get())
    }
}
