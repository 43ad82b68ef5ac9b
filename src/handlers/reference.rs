//! CRUD over the five lookup tables. One set of handlers serves every
//! table; the router binds each route to its `ReferenceKind`.

use axum::extract::{Path, Query, State};
use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::database::models::{ReferenceKind, ReferenceRecord};
use crate::error::ApiError;
use crate::handlers::params::{parse_id, query_id, query_text, QueryParams};
use crate::state::AppState;
use crate::types::RecordId;

/// GET /<table> - every row, ordered by id
pub async fn list(kind: ReferenceKind, State(state): State<AppState>) -> ApiResult<Vec<Value>> {
    let rows = state.store().list_references(kind).await?;
    Ok(ApiResponse::success(rows.iter().map(|r| r.to_json(kind)).collect()))
}

/// POST /<table>/create?<id_key>=..&<label_key>=..; echoes the row with its response keys
pub async fn create(
    kind: ReferenceKind,
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Value> {
    let record = record_from_query(kind, &params)?;
    let created = state.store().create_reference(kind, record).await?;
    tracing::info!("Created {} {}", kind.display_name(), created.id);
    Ok(ApiResponse::created(created.to_json(kind)))
}

/// PUT /<table>/update?<id_key>=..&<label_key>=..
pub async fn update(
    kind: ReferenceKind,
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Value> {
    let record = record_from_query(kind, &params)?;
    let updated = state.store().update_reference(kind, record).await?;
    Ok(ApiResponse::success(updated.to_json(kind)))
}

/// DELETE /<table>/delete/:<id_key>
pub async fn delete(
    kind: ReferenceKind,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Value> {
    let id: RecordId = parse_id(kind.id_key(), &raw_id)?;
    state.store().delete_reference(kind, id).await?;
    tracing::info!("Deleted {} {}", kind.display_name(), id);
    Ok(ApiResponse::success(json!({ "message": kind.delete_message() })))
}

fn record_from_query(
    kind: ReferenceKind,
    params: &QueryParams,
) -> Result<ReferenceRecord, ApiError> {
    let id: RecordId = query_id(params, kind.id_key())?;
    let label = query_text(params, kind.label_key())?;
    Ok(ReferenceRecord::new(id.get(), label))
}
