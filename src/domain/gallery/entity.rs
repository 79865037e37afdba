//! Gallery item entity and stored-entry normalization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// An image archived to the shared gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub prompt: String,
    pub image_base64: String,
    pub created_at: DateTime<Utc>,
}

impl GalleryItem {
    pub fn new(
        prompt: impl Into<String>,
        image_base64: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            image_base64: image_base64.into(),
            created_at,
        }
    }

    /// Canonical stored representation: compact JSON object text
    pub fn to_member(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::internal(format!("Failed to serialize gallery item: {}", e)))
    }

    /// Score used for recency ordering in the sorted set
    pub fn score(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}

/// A sorted-set member paired with the item it decodes to
///
/// `raw` keeps the exact stored string because removal matches by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub raw: String,
    pub item: GalleryItem,
}

impl StoredEntry {
    /// Normalizes a stored member into a gallery item.
    ///
    /// Accepts the canonical JSON object form and the double-encoded form
    /// (a JSON string whose content is the object).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("Gallery entry is not JSON: {}", e)))?;

        let object = match value {
            Value::Object(_) => value,
            Value::String(inner) => serde_json::from_str::<Value>(&inner).map_err(|e| {
                DomainError::validation(format!("Gallery entry holds invalid JSON text: {}", e))
            })?,
            other => {
                return Err(DomainError::validation(format!(
                    "Unexpected gallery entry type: {}",
                    json_type_name(&other)
                )));
            }
        };

        let item: GalleryItem = serde_json::from_value(object)
            .map_err(|e| DomainError::validation(format!("Malformed gallery entry: {}", e)))?;

        Ok(Self {
            raw: raw.to_string(),
            item,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
