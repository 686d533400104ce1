use quarry_core::{classify, codec, Request, RequestBody, SearchError};
use serde_json::Value;

use crate::transport::{
    Transport, TransportRequest, CONTENT_TYPE_JSON, CONTENT_TYPE_NDJSON,
};
use crate::Result;

/// Runs requests against one host: encode, send, decode, classify.
///
/// Holds nothing mutable, so concurrent calls through a shared reference are
/// independent of each other.
pub struct RequestExecutor<T> {
    host: String,
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    pub fn new(host: impl Into<String>, transport: T) -> Self {
        Self {
            host: host.into(),
            transport,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute target for a relative path. Plain concatenation, nothing is
    /// escaped or validated.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path)
    }

    /// Execute one request: exactly one round trip, no retry.
    ///
    /// Returns the decoded body for statuses below 400 and the classified
    /// error otherwise.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: Request) -> Result<Value> {
        let url = self.url(&request.path);

        let (body, content_type) = match request.body {
            Some(RequestBody::Json(value)) => {
                (Some(codec::encode(&value)?.into_bytes()), Some(CONTENT_TYPE_JSON))
            }
            Some(RequestBody::Text(text)) => (Some(text.into_bytes()), Some(CONTENT_TYPE_NDJSON)),
            None => (None, None),
        };

        tracing::debug!(
            url = %url,
            body_bytes = body.as_ref().map_or(0, Vec::len),
            "Sending request"
        );

        let response = self
            .transport
            .send(TransportRequest {
                method: request.method,
                url,
                body,
                content_type,
            })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Transport failed");
                SearchError::from(e)
            })?;

        let status = response.status;
        let raw = response.collect().await.map_err(|e| {
            tracing::warn!(status, error = %e, "Response body interrupted");
            SearchError::incomplete(status, e.to_string())
        })?;
        tracing::debug!(status, bytes = raw.len(), "Received response");

        let decoded = match codec::decode(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(status, error = %e, "Failed to decode response body");
                return Err(SearchError::undecodable(status, &raw, &e));
            }
        };

        if status >= 400 {
            let err = classify(status, decoded);
            tracing::warn!(status, kind = ?err.kind(), "Request failed");
            return Err(err);
        }

        Ok(decoded)
    }
}
