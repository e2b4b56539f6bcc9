//! Signup and login. Both end by issuing a token; login never issues one
//! unless the credential digest matches.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::{wire, ApiResponse, ApiResult};
use crate::auth::{password, token, Claims};
use crate::error::ApiError;
use crate::models::{LoginBody, SignupBody};
use crate::state::AppState;
use crate::store::{Filter, ID_FIELD, USERS};

/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> ApiResult<Value> {
    body.validate()?;

    let existing = state
        .store
        .find_one(USERS, Filter::new().eq("email", body.email.as_str()))
        .await?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let user = wire::to_document(&json!({
        "name": body.name,
        "email": body.email,
        "password_hash": password::hash(&body.password),
        "is_admin": false,
    }))?;
    let id = state.store.insert(USERS, user).await?;

    let claims = Claims::new(id.clone(), body.email.clone(), false);
    let token = token::issue(&claims)?;

    Ok(ApiResponse::created(json!({
        "token": token,
        "user": {
            "id": id,
            "name": body.name,
            "email": body.email,
            "is_admin": false,
        },
    })))
}

/// POST /auth/login
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> ApiResult<Value> {
    let user = state
        .store
        .find_one(USERS, Filter::new().eq("email", body.email.as_str()))
        .await?;

    // Unknown email and wrong password are indistinguishable on purpose
    let user = match user {
        Some(doc)
            if doc
                .get("password_hash")
                .and_then(Value::as_str)
                .map(|digest| password::verify(&body.password, digest))
                .unwrap_or(false) =>
        {
            doc
        }
        _ => return Err(ApiError::unauthorized("Invalid credentials")),
    };

    let field = |name: &str| user.get(name).and_then(Value::as_str).unwrap_or_default().to_string();
    let id = field(ID_FIELD);
    let email = field("email");
    let name = field("name");
    let is_admin = user.get("is_admin").and_then(Value::as_bool).unwrap_or(false);

    let claims = Claims::new(id.clone(), email.clone(), is_admin);
    let token = token::issue(&claims)?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": {
            "id": id,
            "name": name,
            "email": email,
            "is_admin": is_admin,
        },
    })))
}
