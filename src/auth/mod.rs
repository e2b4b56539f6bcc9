//! Authentication and authorization: password digests, JWT issuance and
//! verification, and the guard that resolves a bearer token into a caller
//! identity.

use thiserror::Error;

pub mod guard;
pub mod password;
pub mod token;

pub use guard::{authenticate, require_admin, require_self_or_admin, Identity};
pub use token::Claims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("token invalid")]
    TokenInvalid,

    #[error("JWT secret not configured")]
    MissingSecret,

    /// Token verified but its subject no longer exists in storage.
    #[error("user not found")]
    UserNotFound,

    #[error("{0}")]
    Forbidden(String),
}
