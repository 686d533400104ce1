//! quarry - command-line client for Elasticsearch-compatible search engines
//!
//! # Library Usage
//!
//! The client itself lives in `quarry_rs`:
//!
//! ```rust,no_run
//! use quarry_rs::Client;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Client::localhost()?;
//!     client.refresh("movies").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Command-line Usage
//!
//! ```bash
//! quarry --host http://localhost:9200 search --index movies '{"query":{"match":{"name":"Fury"}}}'
//! ```

pub use quarry_rs;

pub mod cli;
pub mod commands;
pub mod telemetry;
