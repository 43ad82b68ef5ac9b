use axum::extract::{Path, Query, State};
use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::{Product, RecommendationResult};
use crate::error::ApiError;
use crate::handlers::params::{parse_id, query_id, query_text, QueryParams};
use crate::state::AppState;
use crate::types::{ConcernId, ProductId, ProductTypeId, RecordId, SkinTypeId};

/// GET /products/select/:concern_id/:skin_type_id
pub async fn select(
    State(state): State<AppState>,
    Path((concern_id, skin_type_id)): Path<(String, String)>,
) -> ApiResult<Vec<RecommendationResult>> {
    let concern_id: ConcernId = parse_id("concern_id", &concern_id)?;
    let skin_type_id: SkinTypeId = parse_id("skin_type_id", &skin_type_id)?;

    let products = state
        .engine()
        .select_by_concern_and_skin_type(concern_id, skin_type_id)
        .await?;
    Ok(ApiResponse::success(products))
}

/// GET /products/selectspec/:concern_id/:skin_type_id/:product_type_id
pub async fn select_by_type(
    State(state): State<AppState>,
    Path((concern_id, skin_type_id, product_type_id)): Path<(String, String, String)>,
) -> ApiResult<Vec<RecommendationResult>> {
    let concern_id: ConcernId = parse_id("concern_id", &concern_id)?;
    let skin_type_id: SkinTypeId = parse_id("skin_type_id", &skin_type_id)?;
    let product_type_id: ProductTypeId = parse_id("product_type_id", &product_type_id)?;

    let products = state
        .engine()
        .select_by_concern_skin_type_and_product_type(concern_id, skin_type_id, product_type_id)
        .await?;
    Ok(ApiResponse::success(products))
}

/// GET /products
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = state.store().list_products().await?;
    Ok(ApiResponse::success(products))
}

/// POST /products/create?product_id=..&product_name=..&...
pub async fn create(State(state): State<AppState>, Query(params): Query<QueryParams>) -> ApiResult<Product> {
    let product = product_from_query(&params)?;
    let created = state.store().create_product(product).await?;
    tracing::info!("Created product {}", created.product_id);
    Ok(ApiResponse::created(created))
}

/// PUT /products/update?product_id=..&... - full replacement
pub async fn update(State(state): State<AppState>, Query(params): Query<QueryParams>) -> ApiResult<Product> {
    let product = product_from_query(&params)?;
    let updated = state.store().update_product(product).await?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /products/delete/:products_id
pub async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> ApiResult<Value> {
    let id: ProductId = parse_id("products_id", &raw_id)?;
    state.store().delete_product(id).await?;
    tracing::info!("Deleted product {}", id);
    Ok(ApiResponse::success(json!({ "message": "Product deleted" })))
}

fn product_from_query(params: &QueryParams) -> Result<Product, ApiError> {
    Ok(Product {
        product_id: query_id::<ProductId>(params, "product_id")?.get(),
        product_name: query_text(params, "product_name")?,
        all_ingredients: query_text(params, "all_ingredients")?,
        concern_id: query_id::<ConcernId>(params, "concern_id")?.get(),
        skin_type_id: query_id::<SkinTypeId>(params, "skin_type_id")?.get(),
        brand_id: query_id::<RecordId>(params, "brand_id")?.get(),
        product_type_id: query_id::<ProductTypeId>(params, "product_type_id")?.get(),
        key_ingredients_id: query_id::<RecordId>(params, "key_ingredients_id")?.get(),
    })
}
