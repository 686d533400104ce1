use anyhow::{Context, Result};
use quarry_rs::{BulkOptions, Client, CreateIndexOptions, MappingOptions, SearchOptions, Transport};
use serde_json::Value;

use crate::cli::{parse_bulk_values, parse_json_arg, Command};

/// Run one command and return the engine's response.
///
/// Engine failures are returned as `SearchError` inside the `anyhow::Error`
/// so the caller can print the response body.
pub async fn run<T: Transport>(client: &Client<T>, command: Command) -> Result<Value> {
    let result = match command {
        Command::CreateIndex {
            name,
            settings,
            ignore_existing,
        } => {
            let settings = settings.as_deref().map(parse_json_arg).transpose()?;
            let options = CreateIndexOptions {
                throw_if_exists: !ignore_existing,
            };
            client.create_index_with_options(&name, settings, options).await
        }
        Command::DeleteIndex { name } => client.delete_index(&name).await,
        Command::Search {
            index,
            doc_type,
            query,
        } => {
            let query = parse_json_arg(&query)?;
            let options = SearchOptions { index, doc_type };
            client.search(&options, query).await
        }
        Command::Count {
            index,
            doc_type,
            query,
        } => {
            let query = query.as_deref().map(parse_json_arg).transpose()?;
            let options = SearchOptions { index, doc_type };
            client.count(&options, query).await
        }
        Command::GetMapping { index, doc_type } => {
            client
                .get_mapping(&MappingOptions { index, doc_type })
                .await
        }
        Command::PutMapping {
            index,
            doc_type,
            mapping,
        } => {
            let mapping = parse_json_arg(&mapping)?;
            client.put_mapping(&index, &doc_type, mapping).await
        }
        Command::Bulk {
            file,
            index,
            doc_type,
        } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let values = parse_bulk_values(&contents)?;
            tracing::info!(lines = values.len(), file = %file.display(), "Sending bulk request");
            client
                .bulk_raw(&values, &BulkOptions { index, doc_type })
                .await
        }
        Command::Refresh { index } => client.refresh(&index).await,
        Command::Get {
            index,
            doc_type,
            id,
        } => client.get_document(&index, &doc_type, &id).await,
    };

    Ok(result?)
}
