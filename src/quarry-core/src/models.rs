use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Index name that addresses every index on the cluster.
pub const ALL_INDICES: &str = "_all";

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload: a JSON value to be encoded, or text sent as-is
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Text(String), // e.g. a pre-encoded bulk stream
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

/// A single call against the engine, relative to the client host
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn with_text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Set the body from an optional value; `None` leaves the request bodiless
    pub fn with_optional_json(mut self, body: Option<Value>) -> Self {
        self.body = body.map(RequestBody::Json);
        self
    }
}

/// Options for `search` and `count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Index (or comma-separated indices) to search. Default: `_all`
    #[serde(default = "default_index")]
    pub index: String,

    /// Document type to restrict to. Default: empty (all types)
    #[serde(default, rename = "type")]
    pub doc_type: String,
}

impl SearchOptions {
    pub fn index(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = doc_type.into();
        self
    }

    pub fn path(&self, endpoint: &str) -> String {
        join_path(&[self.index.as_str(), self.doc_type.as_str(), endpoint])
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            index: default_index(),
            doc_type: String::new(),
        }
    }
}

/// Options for `get_mapping`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOptions {
    /// Default: `_all`
    #[serde(default = "default_index")]
    pub index: String,

    /// Default: empty (every type in the index)
    #[serde(default, rename = "type")]
    pub doc_type: String,
}

impl MappingOptions {
    pub fn index(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = doc_type.into();
        self
    }

    pub fn path(&self) -> String {
        join_path(&[self.index.as_str(), "_mapping", self.doc_type.as_str()])
    }
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            index: default_index(),
            doc_type: String::new(),
        }
    }
}

/// Options for `bulk`. Index and type become path defaults for entries
/// whose descriptors omit `_index` / `_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOptions {
    /// Default: none
    #[serde(default)]
    pub index: Option<String>,

    /// Default: none. Ignored unless `index` is set
    #[serde(default, rename = "type")]
    pub doc_type: Option<String>,
}

impl BulkOptions {
    pub fn path(&self) -> String {
        match (self.index.as_deref(), self.doc_type.as_deref()) {
            (Some(index), Some(doc_type)) => join_path(&[index, doc_type, "_bulk"]),
            (Some(index), None) => join_path(&[index, "_bulk"]),
            (None, _) => "_bulk".to_string(),
        }
    }
}

/// Options for `create_index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndexOptions {
    /// Fail when the index already exists. Default: `true`.
    /// When `false`, the engine's conflict response body is returned instead.
    #[serde(default = "default_true")]
    pub throw_if_exists: bool,
}

impl Default for CreateIndexOptions {
    fn default() -> Self {
        Self {
            throw_if_exists: default_true(),
        }
    }
}

fn default_index() -> String {
    ALL_INDICES.to_string()
}

fn default_true() -> bool {
    true
}

/// Join non-empty path segments with `/`. Segments are not escaped.
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}
