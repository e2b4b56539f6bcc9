//! Document persistence.
//!
//! Collections hold open JSON objects. The store assigns `_id` (UUID, string
//! form on read) plus `created_at`/`updated_at` stamps in epoch milliseconds;
//! everything else is caller data and flows through untouched.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// An open JSON document as stored in a collection.
pub type Document = Map<String, Value>;

/// Collection names.
pub const USERS: &str = "user";
pub const PRODUCTS: &str = "product";
pub const ORDERS: &str = "order";

/// Field the store assigns on insert and exposes on every read.
pub const ID_FIELD: &str = "_id";

/// Current time as epoch milliseconds, the store's timestamp representation.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Errors from store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Document selection: top-level field equality plus at most one
/// case-insensitive substring match. This covers every lookup the API
/// performs (by email, by admin flag, by category, catalog search).
#[derive(Debug, Clone, Default)]
pub struct Filter {
    eq: Map<String, Value>,
    contains: Option<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.eq.insert(field.into(), value.into());
        self
    }

    /// Require `field` to contain `needle`, case-insensitively.
    pub fn contains(mut self, field: impl Into<String>, needle: impl Into<String>) -> Self {
        self.contains = Some((field.into(), needle.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.eq.is_empty() && self.contains.is_none()
    }

    pub(crate) fn eq_fields(&self) -> &Map<String, Value> {
        &self.eq
    }

    pub(crate) fn contains_clause(&self) -> Option<&(String, String)> {
        self.contains.as_ref()
    }

    /// Evaluate against an in-memory document.
    pub fn matches(&self, doc: &Document) -> bool {
        for (field, expected) in &self.eq {
            if doc.get(field) != Some(expected) {
                return false;
            }
        }
        if let Some((field, needle)) = &self.contains {
            let haystack = match doc.get(field).and_then(Value::as_str) {
                Some(s) => s.to_lowercase(),
                None => return false,
            };
            if !haystack.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Storage collaborator injected into handlers and the auth guard.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a document; assigns `_id` and timestamp stamps, returns the id.
    async fn insert(&self, collection: &str, doc: Document) -> Result<String, StoreError>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn find_one(&self, collection: &str, filter: Filter) -> Result<Option<Document>, StoreError>;

    async fn find_many(
        &self,
        collection: &str,
        filter: Filter,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    /// Merge a sparse field mapping into one document; `false` when no
    /// document matched. Fields absent from `changes` are left untouched.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        changes: Map<String, Value>,
    ) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    async fn count(&self, collection: &str, filter: Filter) -> Result<i64, StoreError>;

    async fn health(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn filter_eq_matches_on_all_fields() {
        let filter = Filter::new().eq("category", "Laptops").eq("brand", "Apple");

        assert!(filter.matches(&doc(json!({"category": "Laptops", "brand": "Apple", "stock": 3}))));
        assert!(!filter.matches(&doc(json!({"category": "Laptops", "brand": "Lenovo"}))));
        assert!(!filter.matches(&doc(json!({"brand": "Apple"}))));
    }

    #[test]
    fn filter_contains_is_case_insensitive() {
        let filter = Filter::new().contains("name", "pixel");

        assert!(filter.matches(&doc(json!({"name": "Pixel 7A"}))));
        assert!(!filter.matches(&doc(json!({"name": "iPhone 14"}))));
        // Non-string field never matches a substring clause
        assert!(!filter.matches(&doc(json!({"name": 42}))));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&doc(json!({"anything": true}))));
        assert!(Filter::new().is_empty());
    }
}
