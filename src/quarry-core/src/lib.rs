//! Quarry Core Library
//!
//! Transport-free building blocks of the quarry search client:
//! - Request/response data model and option structs
//! - JSON codec
//! - Bulk NDJSON encoder
//! - Error classification
//! - Client configuration

pub mod bulk;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use bulk::{BulkMeta, BulkOperation};
pub use codec::CodecError;
pub use config::Config;
pub use error::{classify, ErrorKind, SearchError};
pub use models::*;
