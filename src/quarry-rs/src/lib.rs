//! Quarry Client Library
//!
//! Async HTTP client for Elasticsearch-compatible search engines.
//!
//! ```rust,no_run
//! use quarry_rs::{Client, SearchOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::localhost()?;
//!     let hits = client
//!         .search(&SearchOptions::index("movies"), json!({"query": {"match": {"name": "Fury"}}}))
//!         .await?;
//!     println!("{}", hits);
//!     Ok(())
//! }
//! ```

mod client;
mod executor;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use executor::RequestExecutor;
pub use quarry_core::{
    BulkMeta, BulkOperation, BulkOptions, Config, CreateIndexOptions, ErrorKind, MappingOptions,
    Method, Request, RequestBody, SearchError, SearchOptions,
};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse};

pub type Result<T> = std::result::Result<T, SearchError>;
