//! Typed failures and classification of engine error responses.

use serde_json::Value;

use crate::codec::CodecError;

/// Legacy message prefix for a missing index.
pub const INDEX_MISSING_PREFIX: &str = "IndexMissingException";
/// Legacy message prefix for an index creation conflict.
pub const INDEX_ALREADY_EXISTS_PREFIX: &str = "IndexAlreadyExistsException";

/// Failure of a single request.
///
/// Every variant keeps the decoded response body so callers can inspect what
/// the engine actually said.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("index missing (status {status}): {}", error_text(.body))]
    IndexMissing { status: u16, body: Value },

    #[error("index {} already exists (status {status}): {}", index_name(.index), error_text(.body))]
    IndexAlreadyExists {
        status: u16,
        body: Value,
        index: Option<String>,
    },

    #[error("request failed{}: {}", status_suffix(.status), failure_text(.reason, .body))]
    Generic {
        status: Option<u16>,
        body: Value,
        reason: Option<String>,
    },
}

/// Variant tag of a [`SearchError`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IndexMissing,
    IndexAlreadyExists,
    Generic,
}

impl ErrorKind {
    /// Map a normalized `error.type` code to a kind.
    pub fn from_code(code: &str) -> Self {
        match code {
            "index_not_found_exception" => ErrorKind::IndexMissing,
            "index_already_exists_exception" | "resource_already_exists_exception" => {
                ErrorKind::IndexAlreadyExists
            }
            _ => ErrorKind::Generic,
        }
    }

    /// Map a legacy error message to a kind by its exception-name prefix.
    ///
    /// Fragile: this depends on the engine's message text, not on a stable
    /// code, and is only used when the response carries no `error.type`.
    pub fn from_legacy_message(message: &str) -> Self {
        if message.starts_with(INDEX_MISSING_PREFIX) {
            ErrorKind::IndexMissing
        } else if message.starts_with(INDEX_ALREADY_EXISTS_PREFIX) {
            ErrorKind::IndexAlreadyExists
        } else {
            ErrorKind::Generic
        }
    }
}

/// Classify a failed response (`status >= 400`) by its decoded body.
///
/// Newer engines return `{"error": {"type": "...", "reason": "..."}}`; the
/// `type` code is used when present. Older engines return the exception name
/// and message as a plain string in `error`, which is matched by prefix.
/// Anything else is `Generic`.
pub fn classify(status: u16, body: Value) -> SearchError {
    let kind = match body.get("error") {
        Some(Value::Object(error)) => error
            .get("type")
            .and_then(Value::as_str)
            .map(ErrorKind::from_code)
            .unwrap_or(ErrorKind::Generic),
        Some(Value::String(message)) => ErrorKind::from_legacy_message(message),
        _ => ErrorKind::Generic,
    };

    match kind {
        ErrorKind::IndexMissing => SearchError::IndexMissing { status, body },
        ErrorKind::IndexAlreadyExists => SearchError::IndexAlreadyExists {
            status,
            body,
            index: None,
        },
        ErrorKind::Generic => SearchError::Generic {
            status: Some(status),
            body,
            reason: None,
        },
    }
}

impl SearchError {
    /// Failure that happened before any response was received.
    pub fn transport(reason: impl Into<String>) -> Self {
        SearchError::Generic {
            status: None,
            body: Value::Null,
            reason: Some(reason.into()),
        }
    }

    /// Response whose status arrived but whose body could not be read in full.
    pub fn incomplete(status: u16, reason: impl Into<String>) -> Self {
        SearchError::Generic {
            status: Some(status),
            body: Value::Null,
            reason: Some(reason.into()),
        }
    }

    /// Response that could not be decoded; `raw` is whatever text was received.
    pub fn undecodable(status: u16, raw: &[u8], source: &CodecError) -> Self {
        SearchError::Generic {
            status: Some(status),
            body: Value::String(String::from_utf8_lossy(raw).into_owned()),
            reason: Some(source.to_string()),
        }
    }

    /// Attach the index name to an `IndexAlreadyExists` failure. Other
    /// variants are returned unchanged.
    pub fn with_index(self, name: impl Into<String>) -> Self {
        match self {
            SearchError::IndexAlreadyExists { status, body, .. } => {
                SearchError::IndexAlreadyExists {
                    status,
                    body,
                    index: Some(name.into()),
                }
            }
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::IndexMissing { .. } => ErrorKind::IndexMissing,
            SearchError::IndexAlreadyExists { .. } => ErrorKind::IndexAlreadyExists,
            SearchError::Generic { .. } => ErrorKind::Generic,
        }
    }

    pub fn is_index_missing(&self) -> bool {
        self.kind() == ErrorKind::IndexMissing
    }

    pub fn is_index_already_exists(&self) -> bool {
        self.kind() == ErrorKind::IndexAlreadyExists
    }

    /// HTTP status, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::IndexMissing { status, .. }
            | SearchError::IndexAlreadyExists { status, .. } => Some(*status),
            SearchError::Generic { status, .. } => *status,
        }
    }

    /// Decoded response body.
    pub fn body(&self) -> &Value {
        match self {
            SearchError::IndexMissing { body, .. }
            | SearchError::IndexAlreadyExists { body, .. }
            | SearchError::Generic { body, .. } => body,
        }
    }

    pub fn into_body(self) -> Value {
        match self {
            SearchError::IndexMissing { body, .. }
            | SearchError::IndexAlreadyExists { body, .. }
            | SearchError::Generic { body, .. } => body,
        }
    }

    /// Index name attached by [`SearchError::with_index`].
    pub fn index(&self) -> Option<&str> {
        match self {
            SearchError::IndexAlreadyExists { index, .. } => index.as_deref(),
            _ => None,
        }
    }
}

impl From<CodecError> for SearchError {
    fn from(e: CodecError) -> Self {
        SearchError::Generic {
            status: None,
            body: Value::Null,
            reason: Some(e.to_string()),
        }
    }
}

fn index_name(index: &Option<String>) -> &str {
    index.as_deref().unwrap_or("<unknown>")
}

fn failure_text(reason: &Option<String>, body: &Value) -> String {
    reason.clone().unwrap_or_else(|| error_text(body))
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Short human-readable form of an error body for `Display`.
fn error_text(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Object(error)) => error
            .get("reason")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Value::Object(error.clone()).to_string()),
        Some(other) => other.to_string(),
        None => match body {
            Value::Null => "no response body".to_string(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}
