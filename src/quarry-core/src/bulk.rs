//! NDJSON encoding for the bulk endpoint.
//!
//! The bulk endpoint takes one JSON value per line: an action descriptor,
//! followed by a document for every action except `delete`. The stream must
//! end with a newline, otherwise the engine rejects or misreads the last entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{self, CodecError};

/// Target of a bulk action (`_index`, `_type`, `_id`). Absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkMeta {
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl BulkMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One bulk entry: an action descriptor and, except for deletes, its document.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOperation {
    pub action: Value,
    pub document: Option<Value>,
}

impl BulkOperation {
    /// Build an entry from an arbitrary descriptor, e.g. one read from a file.
    pub fn new(action: Value, document: Option<Value>) -> Self {
        Self { action, document }
    }

    pub fn index(meta: BulkMeta, document: Value) -> Self {
        Self::with_action("index", meta, Some(document))
    }

    pub fn create(meta: BulkMeta, document: Value) -> Self {
        Self::with_action("create", meta, Some(document))
    }

    /// `document` is the update body, e.g. `{"doc": {...}}`.
    pub fn update(meta: BulkMeta, document: Value) -> Self {
        Self::with_action("update", meta, Some(document))
    }

    pub fn delete(meta: BulkMeta) -> Self {
        Self::with_action("delete", meta, None)
    }

    fn with_action(name: &str, meta: BulkMeta, document: Option<Value>) -> Self {
        // BulkMeta only holds optional strings, so it always converts to an object.
        let meta = serde_json::to_value(meta).unwrap_or_else(|_| Value::Object(Map::new()));
        let mut action = Map::new();
        action.insert(name.to_string(), meta);
        Self {
            action: Value::Object(action),
            document,
        }
    }

    /// Number of NDJSON lines this entry produces.
    pub fn line_count(&self) -> usize {
        if self.document.is_some() {
            2
        } else {
            1
        }
    }
}

/// Encode a sequence of values as NDJSON, one compact line each, with a
/// trailing newline after the last line.
///
/// Pairing of descriptors and documents is not checked.
pub fn encode<T: Serialize>(items: &[T]) -> Result<String, CodecError> {
    let lines = items
        .iter()
        .map(|item| codec::encode(item))
        .collect::<Result<Vec<_>, _>>()?;

    let mut body = lines.join("\n");
    body.push('\n');
    Ok(body)
}

/// Flatten operations into descriptor/document lines, preserving order.
pub fn encode_operations(operations: &[BulkOperation]) -> Result<String, CodecError> {
    let mut values: Vec<&Value> =
        Vec::with_capacity(operations.iter().map(BulkOperation::line_count).sum());
    for op in operations {
        values.push(&op.action);
        if let Some(document) = &op.document {
            values.push(document);
        }
    }
    encode(&values)
}
