use axum::extract::State;
use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::auth::{require_admin, Identity};
use crate::state::AppState;
use crate::store::{Filter, ORDERS, PRODUCTS, USERS};

/// GET /admin/stats
pub async fn stats(State(state): State<AppState>, identity: Identity) -> ApiResult<Value> {
    require_admin(&identity)?;

    let users = state.store.count(USERS, Filter::new()).await?;
    let products = state.store.count(PRODUCTS, Filter::new()).await?;
    let orders = state.store.count(ORDERS, Filter::new()).await?;

    Ok(ApiResponse::success(json!({
        "users": users,
        "products": products,
        "orders": orders,
    })))
}
