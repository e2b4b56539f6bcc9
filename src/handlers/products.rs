//! Product catalog CRUD. Reads are public; writes are admin-gated before
//! anything touches storage.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{wire, ApiResponse, ApiResult};
use crate::auth::{require_admin, Identity};
use crate::config::config;
use crate::error::ApiError;
use crate::models::{ProductBody, ProductUpdateBody};
use crate::state::AppState;
use crate::store::{Filter, PRODUCTS};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

/// GET /products
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> ApiResult<Vec<Value>> {
    let mut filter = Filter::new();
    if let Some(q) = params.q.filter(|q| !q.is_empty()) {
        filter = filter.contains("name", q);
    }
    if let Some(category) = params.category.filter(|c| !c.is_empty()) {
        filter = filter.eq("category", category);
    }

    let docs = state
        .store
        .find_many(PRODUCTS, filter, config().catalog.max_list_results)
        .await?;

    Ok(ApiResponse::success(docs.into_iter().map(wire::to_wire).collect()))
}

/// GET /products/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let doc = state
        .store
        .find_by_id(PRODUCTS, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::success(wire::to_wire(doc)))
}

/// POST /products (admin)
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<ProductBody>,
) -> ApiResult<Value> {
    require_admin(&identity)?;
    body.validate()?;

    let id = state.store.insert(PRODUCTS, wire::to_document(&body)?).await?;
    Ok(ApiResponse::created(json!({ "id": id })))
}

/// PUT /products/:id (admin)
pub async fn update(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    Json(body): Json<ProductUpdateBody>,
) -> ApiResult<Value> {
    require_admin(&identity)?;
    body.validate()?;

    let changes = wire::sparse_update(&body)?;
    let matched = state.store.update_by_id(PRODUCTS, &id, changes).await?;
    if !matched {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(ApiResponse::success(json!({ "ok": true })))
}

/// DELETE /products/:id (admin)
pub async fn remove(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    require_admin(&identity)?;

    let deleted = state.store.delete_by_id(PRODUCTS, &id).await?;
    if !deleted {
        return Err(ApiError::not_found("Product not found"));
    }

    Ok(ApiResponse::success(json!({ "ok": true })))
}
