//! Access control: resolve a bearer token into a caller identity and gate
//! routes on role or ownership.
//!
//! `authenticate` re-reads the user from storage on every call, so a token
//! whose subject has since been deleted stops working even though the
//! signature still verifies.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Document, Store, ID_FIELD, USERS};

use super::{token, AuthError};

/// The storage-confirmed caller derived from a verified token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl Identity {
    /// Join verified claims with the freshly loaded user document. The
    /// document wins for everything but the id, which the lookup already
    /// confirmed.
    fn from_document(doc: &Document) -> Self {
        let get_str =
            |field: &str| doc.get(field).and_then(Value::as_str).unwrap_or_default().to_string();
        Self {
            id: get_str(ID_FIELD),
            name: get_str("name"),
            email: get_str("email"),
            is_admin: doc.get("is_admin").and_then(Value::as_bool).unwrap_or(false),
        }
    }
}

/// Verify the token, then confirm its subject still exists.
pub async fn authenticate(store: &dyn Store, token: &str) -> Result<Identity, ApiError> {
    let claims = token::verify(token)?;
    let doc = store
        .find_by_id(USERS, &claims.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    Ok(Identity::from_document(&doc))
}

pub fn require_admin(identity: &Identity) -> Result<(), AuthError> {
    if identity.is_admin {
        Ok(())
    } else {
        Err(AuthError::Forbidden("Admin only".to_string()))
    }
}

pub fn require_self_or_admin(identity: &Identity, target_user_id: &str) -> Result<(), AuthError> {
    if identity.id == target_user_id || identity.is_admin {
        Ok(())
    } else {
        Err(AuthError::Forbidden("Not allowed".to_string()))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized("Authorization header must use Bearer token format")),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        authenticate(state.store.as_ref(), token).await
    }
}
