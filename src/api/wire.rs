//! Wire shaping for stored documents.
//!
//! Storage keeps an opaque `_id` and epoch-millisecond timestamps; clients
//! get a string `id` and ISO-8601 strings. Going the other way, partial
//! update bodies become sparse field mappings: only the fields the caller
//! actually sent are written, and `updated_at` is always refreshed.

use chrono::{TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::store::{now_millis, Document, ID_FIELD};

/// Shape a stored document for a response body: `_id` becomes a public
/// string `id`, and any top-level `*_at` field holding an epoch-millisecond
/// number becomes an ISO-8601 string. Everything else passes through
/// unchanged, unknown fields included.
pub fn to_wire(mut doc: Document) -> Value {
    if let Some(id) = doc.remove(ID_FIELD) {
        let id = match id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        doc.insert("id".to_string(), Value::String(id));
    }

    for (field, value) in doc.iter_mut() {
        if !field.ends_with("_at") {
            continue;
        }
        if let Some(millis) = value.as_i64() {
            if let Some(formatted) = format_timestamp(millis) {
                *value = Value::String(formatted);
            }
        }
    }

    Value::Object(doc)
}

fn format_timestamp(millis: i64) -> Option<String> {
    Utc.timestamp_millis_opt(millis).single().map(|dt| dt.to_rfc3339())
}

/// Serialize a typed request body into a storable document.
pub fn to_document<T: Serialize>(body: &T) -> Result<Document, ApiError> {
    match serde_json::to_value(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::bad_request("Request body must be an object")),
        Err(e) => {
            tracing::error!("Failed to serialize request body: {}", e);
            Err(ApiError::internal_server_error("Failed to process request"))
        }
    }
}

/// Turn a partial update body into a sparse field mapping. Fields the caller
/// omitted never appear, so stored values survive untouched; `updated_at` is
/// injected unconditionally, which makes an empty body a pure timestamp
/// touch.
pub fn sparse_update<T: Serialize>(body: &T) -> Result<Map<String, Value>, ApiError> {
    let value = serde_json::to_value(body).map_err(|e| {
        tracing::error!("Failed to serialize update body: {}", e);
        ApiError::internal_server_error("Failed to process update")
    })?;

    let mut changes = match value {
        Value::Object(map) => map,
        _ => return Err(ApiError::bad_request("Update body must be an object")),
    };

    changes.retain(|_, v| !v.is_null());
    changes.insert("updated_at".to_string(), Value::from(now_millis()));
    Ok(changes)
}
