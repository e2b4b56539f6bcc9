//! In-memory store, the substitutable fake for tests and local demos.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{now_millis, Document, Filter, Store, StoreError, ID_FIELD};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn with_id(id: &str, doc: &Document) -> Document {
    let mut out = doc.clone();
    out.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    out
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, collection: &str, mut doc: Document) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = now_millis();
        doc.remove(ID_FIELD);
        doc.insert("created_at".to_string(), Value::from(now));
        doc.insert("updated_at".to_string(), Value::from(now));

        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().insert(id.clone(), doc);
        Ok(id)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|doc| with_id(id, doc)))
    }

    async fn find_one(&self, collection: &str, filter: Filter) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(_, doc)| filter.matches(doc))
                .map(|(id, doc)| with_id(id, doc))
        }))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Filter,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(vec![]);
        };

        let mut results: Vec<Document> = docs
            .iter()
            .filter(|(_, doc)| filter.matches(doc))
            .map(|(id, doc)| with_id(id, doc))
            .collect();
        // Stable order so listings don't shuffle between calls
        results.sort_by(|a, b| {
            let created = |d: &Document| d.get("created_at").and_then(Value::as_i64).unwrap_or(0);
            created(a).cmp(&created(b)).then_with(|| {
                let id = |d: &Document| {
                    d.get(ID_FIELD).and_then(Value::as_str).unwrap_or_default().to_string()
                };
                id(a).cmp(&id(b))
            })
        });
        results.truncate(limit.max(0) as usize);
        Ok(results)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        changes: Map<String, Value>,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(false);
        };
        for (field, value) in changes {
            if field != ID_FIELD {
                doc.insert(field, value);
            }
        }
        Ok(true)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false))
    }

    async fn count(&self, collection: &str, filter: Filter) -> Result<i64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().filter(|doc| filter.matches(doc)).count() as i64)
            .unwrap_or(0))
    }

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
