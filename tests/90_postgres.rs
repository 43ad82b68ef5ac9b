//! Runs against a live Postgres. `DATABASE_URL` must point at a scratch
//! database; every table in `sql/schema.sql` is emptied first.

use anyhow::{Context, Result};
use serde_json::json;

use skinalyze_api::config::config;
use skinalyze_api::database::models::{Product, RecommendationFilter, ReferenceKind, ReferenceRecord};
use skinalyze_api::database::{CatalogStore, DatabaseError, DatabaseManager, PgStore};
use skinalyze_api::types::{ConcernId, ProductTypeId, RecordId, SkinTypeId};

const SCHEMA: &str = include_str!("../sql/schema.sql");

async fn fresh_store() -> Result<PgStore> {
    let url = DatabaseManager::database_url().context("DATABASE_URL must be set")?;
    let pool = DatabaseManager::connect(&url, &config().database).await?;

    for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(&pool).await?;
    }
    for table in ["Products", "Brand", "Concern", "Skin_Type", "Product_Type", "Key_Ingredients"] {
        sqlx::query(&format!("DELETE FROM {}", table)).execute(&pool).await?;
    }

    Ok(PgStore::new(pool, None))
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_postgres_catalog_round_trip() -> Result<()> {
    let store = fresh_store().await?;
    store.ping().await?;

    for (kind, label) in [
        (ReferenceKind::Brand, "Acme"),
        (ReferenceKind::Concern, "Acne"),
        (ReferenceKind::SkinType, "Oily"),
        (ReferenceKind::KeyIngredient, "Salicylic Acid"),
        (ReferenceKind::ProductType, "Cleanser"),
    ] {
        store.create_reference(kind, ReferenceRecord::new(1, label)).await?;
    }
    store
        .create_reference(ReferenceKind::ProductType, ReferenceRecord::new(2, "Serum"))
        .await?;

    let product = |id: i32, name: &str, product_type_id: i32| Product {
        product_id: id,
        product_name: name.to_string(),
        all_ingredients: "water".to_string(),
        concern_id: 1,
        skin_type_id: 1,
        brand_id: 1,
        product_type_id,
        key_ingredients_id: 1,
    };
    store.create_product(product(3, "Serum A", 2)).await?;
    store.create_product(product(1, "Clear Wash", 1)).await?;

    let filter = RecommendationFilter::new(ConcernId(1), SkinTypeId(1));
    let rows = store.select_recommendations(&filter).await?;
    let names: Vec<_> = rows.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, vec!["Clear Wash", "Serum A"]);
    assert_eq!(
        serde_json::to_value(&rows[0])?,
        json!({
            "product_name": "Clear Wash",
            "all_ingredients": "water",
            "brand": "Acme",
            "concern": "Acne",
            "key_ingredients": "Salicylic Acid",
            "skin_type": "Oily"
        })
    );

    let narrowed = store
        .select_recommendations(&filter.with_product_type(ProductTypeId(2)))
        .await?;
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].product_name, "Serum A");

    let err = store
        .create_reference(ReferenceKind::Brand, ReferenceRecord::new(1, "Again"))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)));

    let err = store
        .delete_reference(ReferenceKind::Concern, RecordId(1))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)));

    let mut orphan = product(9, "Orphan", 1);
    orphan.brand_id = 99;
    let err = store.create_product(orphan).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict(_)));

    let mut renamed = product(1, "Clear Wash 2", 1);
    renamed.all_ingredients = "water, glycerin".to_string();
    store.update_product(renamed).await?;
    let products = store.list_products().await?;
    assert_eq!(products[0].product_name, "Clear Wash 2");
    assert_eq!(products[1].product_name, "Serum A");

    let err = store.update_product(product(42, "Ghost", 1)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));

    store.pool().close().await;
    Ok(())
}
