use quarry_core::bulk;
use quarry_core::config::{Config, DEFAULT_HOST};
use quarry_core::models::join_path;
use quarry_core::{
    BulkOperation, BulkOptions, CreateIndexOptions, MappingOptions, Request, SearchError,
    SearchOptions,
};
use serde::Serialize;
use serde_json::Value;

use crate::executor::RequestExecutor;
use crate::transport::{ReqwestTransport, Transport, TransportError};
use crate::Result;

/// Quarry REST API Client
///
/// Every operation is one request through [`RequestExecutor`]; successful
/// calls return the engine's decoded JSON response unchanged.
pub struct Client<T = ReqwestTransport> {
    executor: RequestExecutor<T>,
}

impl Client<ReqwestTransport> {
    /// Create a new client connected to the given base URL
    pub fn new(host: impl Into<String>) -> std::result::Result<Self, TransportError> {
        Ok(Self::with_transport(host, ReqwestTransport::new()?))
    }

    /// Client for `http://localhost:9200`
    pub fn localhost() -> std::result::Result<Self, TransportError> {
        Self::new(DEFAULT_HOST)
    }

    pub fn from_config(config: &Config) -> std::result::Result<Self, TransportError> {
        let transport = ReqwestTransport::with_config(&config.transport)?;
        Ok(Self::with_transport(config.host.clone(), transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(host: impl Into<String>, transport: T) -> Self {
        Self {
            executor: RequestExecutor::new(host, transport),
        }
    }

    pub fn host(&self) -> &str {
        self.executor.host()
    }

    pub fn executor(&self) -> &RequestExecutor<T> {
        &self.executor
    }

    /// Run an arbitrary request
    pub async fn execute(&self, request: Request) -> Result<Value> {
        self.executor.execute(request).await
    }

    /// Create an index, failing if it already exists
    pub async fn create_index(&self, name: &str, settings: Option<Value>) -> Result<Value> {
        self.create_index_with_options(name, settings, CreateIndexOptions::default())
            .await
    }

    /// Create an index.
    ///
    /// When the index already exists and `throw_if_exists` is false, the
    /// engine's conflict response body is returned as success. Otherwise the
    /// conflict error is returned with `name` attached.
    pub async fn create_index_with_options(
        &self,
        name: &str,
        settings: Option<Value>,
        options: CreateIndexOptions,
    ) -> Result<Value> {
        let request = Request::put(name).with_optional_json(settings);

        match self.executor.execute(request).await {
            Err(err @ SearchError::IndexAlreadyExists { .. }) => {
                if options.throw_if_exists {
                    Err(err.with_index(name))
                } else {
                    tracing::debug!(index = %name, "Index already exists, keeping it");
                    Ok(err.into_body())
                }
            }
            other => other,
        }
    }

    pub async fn delete_index(&self, name: &str) -> Result<Value> {
        self.executor.execute(Request::delete(name)).await
    }

    /// Search documents
    /// POST {index}[/{type}]/_search
    pub async fn search(&self, options: &SearchOptions, query: Value) -> Result<Value> {
        let request = Request::post(options.path("_search")).with_json(query);
        self.executor.execute(request).await
    }

    /// Count documents matching an optional query
    /// POST {index}[/{type}]/_count
    pub async fn count(&self, options: &SearchOptions, query: Option<Value>) -> Result<Value> {
        let request = Request::post(options.path("_count")).with_optional_json(query);
        self.executor.execute(request).await
    }

    /// PUT {index}/_mapping[/{type}]
    pub async fn put_mapping(&self, index: &str, doc_type: &str, mapping: Value) -> Result<Value> {
        let path = join_path(&[index, "_mapping", doc_type]);
        self.executor
            .execute(Request::put(path).with_json(mapping))
            .await
    }

    /// GET {index}/_mapping[/{type}]
    pub async fn get_mapping(&self, options: &MappingOptions) -> Result<Value> {
        self.executor.execute(Request::get(options.path())).await
    }

    /// Submit operations to `_bulk` in the given order
    pub async fn bulk(&self, operations: &[BulkOperation]) -> Result<Value> {
        self.bulk_with_options(operations, &BulkOptions::default())
            .await
    }

    pub async fn bulk_with_options(
        &self,
        operations: &[BulkOperation],
        options: &BulkOptions,
    ) -> Result<Value> {
        let body = bulk::encode_operations(operations)?;
        tracing::debug!(operations = operations.len(), bytes = body.len(), "Submitting bulk request");
        self.executor
            .execute(Request::post(options.path()).with_text(body))
            .await
    }

    /// Submit an already interleaved descriptor/document sequence to `_bulk`.
    /// The sequence is not checked; engine-side errors come back as `Generic`.
    pub async fn bulk_raw<S: Serialize>(&self, values: &[S], options: &BulkOptions) -> Result<Value> {
        let body = bulk::encode(values)?;
        self.executor
            .execute(Request::post(options.path()).with_text(body))
            .await
    }

    /// Store a document. With an id the document is PUT at that id,
    /// without one it is POSTed and the engine assigns an id.
    pub async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        document: Value,
    ) -> Result<Value> {
        let request = match id {
            Some(id) => Request::put(join_path(&[index, doc_type, id])),
            None => Request::post(join_path(&[index, doc_type])),
        };
        self.executor.execute(request.with_json(document)).await
    }

    pub async fn get_document(&self, index: &str, doc_type: &str, id: &str) -> Result<Value> {
        self.executor
            .execute(Request::get(join_path(&[index, doc_type, id])))
            .await
    }

    pub async fn delete_document(&self, index: &str, doc_type: &str, id: &str) -> Result<Value> {
        self.executor
            .execute(Request::delete(join_path(&[index, doc_type, id])))
            .await
    }

    /// Make recent writes to an index visible to search
    pub async fn refresh(&self, index: &str) -> Result<Value> {
        self.executor
            .execute(Request::post(join_path(&[index, "_refresh"])))
            .await
    }
}
