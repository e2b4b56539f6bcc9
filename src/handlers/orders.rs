//! Order placement. A caller may order for their own account; admins may
//! order on anyone's behalf.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::{wire, ApiResponse, ApiResult};
use crate::auth::{require_self_or_admin, Identity};
use crate::models::OrderBody;
use crate::state::AppState;
use crate::store::ORDERS;

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<OrderBody>,
) -> ApiResult<Value> {
    require_self_or_admin(&identity, &body.user_id)?;
    body.validate()?;

    let id = state.store.insert(ORDERS, wire::to_document(&body)?).await?;
    Ok(ApiResponse::created(json!({ "id": id })))
}
