#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use skinalyze_api::config::{config, AppConfig};
use skinalyze_api::database::models::{
    Product, RecommendationFilter, RecommendationResult, ReferenceKind, ReferenceRecord,
};
use skinalyze_api::database::{CatalogStore, DatabaseError, MemoryStore};
use skinalyze_api::types::{ProductId, RecordId};
use skinalyze_api::{app, AppState};

pub fn router(store: Arc<dyn CatalogStore>) -> Router {
    router_with(store, config())
}

pub fn router_with(store: Arc<dyn CatalogStore>, config: &AppConfig) -> Router {
    app(AppState::new(store), config)
}

/// Send a bodyless request through the router; non-empty bodies are parsed as JSON
pub async fn call(app: &Router, method: Method, uri: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().method(method).uri(uri).body(Body::empty())?;
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    call(app, Method::GET, uri).await
}

pub fn product(id: i32, name: &str, concern: i32, skin: i32, product_type: i32) -> Product {
    Product {
        product_id: id,
        product_name: name.to_string(),
        all_ingredients: format!("{} ingredients", name),
        concern_id: concern,
        skin_type_id: skin,
        brand_id: 1,
        product_type_id: product_type,
        key_ingredients_id: 1,
    }
}

/// Brand{1,"Acme"}, Concern{1,"Acne"}, SkinType{1,"Oily"}, KeyIngredient{1,"Salicylic Acid"},
/// ProductType{1,"Cleanser"} and Product{1,"Clear Wash"} over all of them.
pub async fn scenario_store() -> Result<Arc<MemoryStore>> {
    let store = Arc::new(MemoryStore::new());
    let seeds = [
        (ReferenceKind::Brand, "Acme"),
        (ReferenceKind::Concern, "Acne"),
        (ReferenceKind::SkinType, "Oily"),
        (ReferenceKind::KeyIngredient, "Salicylic Acid"),
        (ReferenceKind::ProductType, "Cleanser"),
    ];
    for (kind, label) in seeds {
        store.create_reference(kind, ReferenceRecord::new(1, label)).await?;
    }
    store
        .create_product(Product {
            product_id: 1,
            product_name: "Clear Wash".to_string(),
            all_ingredients: "water, salicylic acid".to_string(),
            concern_id: 1,
            skin_type_id: 1,
            brand_id: 1,
            product_type_id: 1,
            key_ingredients_id: 1,
        })
        .await?;
    Ok(store)
}

/// Scenario data plus a second concern/skin type and three product types
pub async fn routine_store() -> Result<Arc<MemoryStore>> {
    let store = scenario_store().await?;
    store.create_reference(ReferenceKind::Concern, ReferenceRecord::new(2, "Dryness")).await?;
    store.create_reference(ReferenceKind::SkinType, ReferenceRecord::new(2, "Dry")).await?;
    store.create_reference(ReferenceKind::ProductType, ReferenceRecord::new(2, "Serum")).await?;
    store.create_reference(ReferenceKind::ProductType, ReferenceRecord::new(3, "Moisturizer")).await?;

    store.create_product(product(2, "Night Cream", 1, 1, 3)).await?;
    store.create_product(product(3, "BHA Serum", 1, 1, 2)).await?;
    store.create_product(product(4, "Foam Cleanser", 1, 1, 1)).await?;
    store.create_product(product(5, "Barrier Serum", 2, 2, 2)).await?;
    store.create_product(product(6, "Oily Hydrator", 2, 1, 3)).await?;
    Ok(store)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    Query,
    Decode,
}

/// Wraps a `MemoryStore`, counts every store call and can fail them all.
/// A stalled store sleeps before answering recommendation reads.
pub struct CountingStore {
    inner: Arc<MemoryStore>,
    failure: Failure,
    stall: Option<Duration>,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<MemoryStore>, failure: Failure) -> Arc<Self> {
        Arc::new(Self {
            inner,
            failure,
            stall: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn stalled(inner: Arc<MemoryStore>, stall: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner,
            failure: Failure::None,
            stall: Some(stall),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) -> Result<(), DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Failure::None => Ok(()),
            Failure::Query => Err(DatabaseError::QueryFailure("connection refused".to_string())),
            Failure::Decode => Err(DatabaseError::RowDecodeFailure(
                "column \"brand\" not found".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CatalogStore for CountingStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.touch()?;
        self.inner.ping().await
    }

    async fn list_references(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>, DatabaseError> {
        self.touch()?;
        self.inner.list_references(kind).await
    }

    async fn create_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError> {
        self.touch()?;
        self.inner.create_reference(kind, record).await
    }

    async fn update_reference(
        &self,
        kind: ReferenceKind,
        record: ReferenceRecord,
    ) -> Result<ReferenceRecord, DatabaseError> {
        self.touch()?;
        self.inner.update_reference(kind, record).await
    }

    async fn delete_reference(&self, kind: ReferenceKind, id: RecordId) -> Result<(), DatabaseError> {
        self.touch()?;
        self.inner.delete_reference(kind, id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, DatabaseError> {
        self.touch()?;
        self.inner.list_products().await
    }

    async fn create_product(&self, product: Product) -> Result<Product, DatabaseError> {
        self.touch()?;
        self.inner.create_product(product).await
    }

    async fn update_product(&self, product: Product) -> Result<Product, DatabaseError> {
        self.touch()?;
        self.inner.update_product(product).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), DatabaseError> {
        self.touch()?;
        self.inner.delete_product(id).await
    }

    async fn select_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> Result<Vec<RecommendationResult>, DatabaseError> {
        self.touch()?;
        if let Some(stall) = self.stall {
            tokio::time::sleep(stall).await;
        }
        self.inner.select_recommendations(filter).await
    }
}
