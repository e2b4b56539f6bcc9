//! Postgres-backed document store.
//!
//! All collections share a single `documents` table; the document body lives
//! in a JSONB column. Equality filters compile to JSONB containment (`@>`),
//! substring filters to `ILIKE` on the extracted text, and sparse updates to
//! a `doc || $changes` merge.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::config::config;

use super::{now_millis, Document, Filter, Store, StoreError, ID_FIELD};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS documents (
    id UUID PRIMARY KEY,
    collection TEXT NOT NULL,
    doc JSONB NOT NULL
)";

const COLLECTION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect using `DATABASE_URL` and ensure the documents table exists.
    pub async fn connect() -> Result<Self, StoreError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

        let db_config = &config().database;
        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connection_timeout))
            .connect(&url)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!("Connected document store");
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        sqlx::query(COLLECTION_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    fn row_to_document(row: &PgRow) -> Result<Document, StoreError> {
        let id: Uuid = row.try_get("id")?;
        let doc: Value = row.try_get("doc")?;
        match doc {
            Value::Object(mut map) => {
                map.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
                Ok(map)
            }
            other => Err(StoreError::QueryError(format!(
                "document {} is not a JSON object: {}",
                id, other
            ))),
        }
    }

    /// Append the filter's WHERE clauses; `$1` is always the collection.
    fn push_filter_sql(sql: &mut String, filter: &Filter) {
        let mut next_param = 2;
        if !filter.eq_fields().is_empty() {
            sql.push_str(&format!(" AND doc @> ${}", next_param));
            next_param += 1;
        }
        if filter.contains_clause().is_some() {
            sql.push_str(&format!(" AND doc->>${} ILIKE ${}", next_param, next_param + 1));
        }
    }

    fn bind_filter<'q>(
        mut query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
        filter: &'q Filter,
    ) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
        if !filter.eq_fields().is_empty() {
            query = query.bind(Value::Object(filter.eq_fields().clone()));
        }
        if let Some((field, needle)) = filter.contains_clause() {
            query = query.bind(field.as_str()).bind(format!("%{}%", needle));
        }
        query
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert(&self, collection: &str, mut doc: Document) -> Result<String, StoreError> {
        let id = Uuid::new_v4();
        let now = now_millis();
        doc.remove(ID_FIELD);
        doc.insert("created_at".to_string(), Value::from(now));
        doc.insert("updated_at".to_string(), Value::from(now));

        sqlx::query("INSERT INTO documents (id, collection, doc) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(Value::Object(doc))
            .execute(&self.pool)
            .await?;

        Ok(id.to_string())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row = sqlx::query("SELECT id, doc FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_document).transpose()
    }

    async fn find_one(&self, collection: &str, filter: Filter) -> Result<Option<Document>, StoreError> {
        let mut sql = String::from("SELECT id, doc FROM documents WHERE collection = $1");
        Self::push_filter_sql(&mut sql, &filter);
        sql.push_str(" LIMIT 1");

        let query = Self::bind_filter(sqlx::query(&sql).bind(collection), &filter);
        let row = query.fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::row_to_document).transpose()
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Filter,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let mut sql = String::from("SELECT id, doc FROM documents WHERE collection = $1");
        Self::push_filter_sql(&mut sql, &filter);
        sql.push_str(&format!(" ORDER BY doc->'created_at' ASC, id ASC LIMIT {}", limit.max(0)));

        let query = Self::bind_filter(sqlx::query(&sql).bind(collection), &filter);
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_document).collect()
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        changes: Map<String, Value>,
    ) -> Result<bool, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result =
            sqlx::query("UPDATE documents SET doc = doc || $3 WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .bind(Value::Object(changes))
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: &str, filter: Filter) -> Result<i64, StoreError> {
        let mut sql = String::from("SELECT COUNT(*) FROM documents WHERE collection = $1");
        Self::push_filter_sql(&mut sql, &filter);

        let query = Self::bind_filter(sqlx::query(&sql).bind(collection), &filter);
        let row = query.fetch_one(&self.pool).await?;
        Ok(row.try_get::<i64, _>(0)?)
    }

    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
