use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quarry_core::models::ALL_INDICES;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "quarry",
    version,
    about = "Command-line client for Elasticsearch-compatible search engines"
)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, short, default_value = "config.json")]
    pub config: String,

    /// Engine base URL, overrides the configuration file
    #[arg(long, env = "QUARRY_HOST")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// JSON arguments take inline JSON or `@path` to read a file.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an index
    CreateIndex {
        name: String,
        /// Index settings and mappings
        #[arg(long)]
        settings: Option<String>,
        /// Return the engine response instead of failing when the index exists
        #[arg(long)]
        ignore_existing: bool,
    },
    /// Delete an index
    DeleteIndex { name: String },
    /// Run a search query
    Search {
        #[arg(long, default_value = ALL_INDICES)]
        index: String,
        #[arg(long = "type", default_value = "")]
        doc_type: String,
        query: String,
    },
    /// Count documents, optionally matching a query
    Count {
        #[arg(long, default_value = ALL_INDICES)]
        index: String,
        #[arg(long = "type", default_value = "")]
        doc_type: String,
        query: Option<String>,
    },
    /// Show mappings
    GetMapping {
        #[arg(long, default_value = ALL_INDICES)]
        index: String,
        #[arg(long = "type", default_value = "")]
        doc_type: String,
    },
    /// Create or update the mapping of a type
    PutMapping {
        index: String,
        doc_type: String,
        mapping: String,
    },
    /// Send a bulk request from a file of NDJSON lines or a JSON array
    Bulk {
        file: PathBuf,
        #[arg(long)]
        index: Option<String>,
        #[arg(long = "type")]
        doc_type: Option<String>,
    },
    /// Refresh an index
    Refresh { index: String },
    /// Fetch a document by id
    Get {
        index: String,
        doc_type: String,
        id: String,
    },
}

/// Parse inline JSON, or the contents of a file when the argument is `@path`.
pub fn parse_json_arg(arg: &str) -> Result<Value> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path))
        }
        None => serde_json::from_str(arg).context("Invalid JSON argument"),
    }
}

/// Read bulk input as a sequence of values, in file order.
///
/// A file starting with `[` is one JSON array; anything else is NDJSON with
/// one value per non-blank line.
pub fn parse_bulk_values(contents: &str) -> Result<Vec<Value>> {
    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(contents).context("Invalid JSON array");
    }

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid JSON on line {}", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_search_defaults() {
        let cli = Cli::try_parse_from(["quarry", "search", "{}"]).unwrap();
        match cli.command {
            Command::Search { index, doc_type, query } => {
                assert_eq!(index, "_all");
                assert_eq!(doc_type, "");
                assert_eq!(query, "{}");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.config, "config.json");
    }

    #[test]
    fn test_parse_create_index_flags() {
        let cli = Cli::try_parse_from([
            "quarry",
            "--host",
            "http://es:9200",
            "create-index",
            "movies",
            "--ignore-existing",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("http://es:9200"));
        assert!(matches!(
            cli.command,
            Command::CreateIndex { ref name, settings: None, ignore_existing: true } if name == "movies"
        ));
    }

    #[test]
    fn test_parse_bulk_type_flag() {
        let cli =
            Cli::try_parse_from(["quarry", "bulk", "data.ndjson", "--index", "movies", "--type", "movie"])
                .unwrap();
        match cli.command {
            Command::Bulk { file, index, doc_type } => {
                assert_eq!(file, PathBuf::from("data.ndjson"));
                assert_eq!(index.as_deref(), Some("movies"));
                assert_eq!(doc_type.as_deref(), Some("movie"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_json_arg_inline() {
        assert_eq!(parse_json_arg(r#"{"size": 0}"#).unwrap(), json!({"size": 0}));
        assert!(parse_json_arg("{not json").is_err());
    }

    #[test]
    fn test_parse_json_arg_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"query": {{"match_all": {{}}}}}}"#).unwrap();
        let arg = format!("@{}", file.path().display());
        assert_eq!(parse_json_arg(&arg).unwrap(), json!({"query": {"match_all": {}}}));
    }

    #[test]
    fn test_parse_bulk_ndjson() {
        let contents = "{\"index\":{\"_id\":\"1\"}}\n{\"name\":\"Fury\"}\n\n{\"delete\":{\"_id\":\"2\"}}\n";
        let values = parse_bulk_values(contents).unwrap();
        assert_eq!(
            values,
            vec![
                json!({"index": {"_id": "1"}}),
                json!({"name": "Fury"}),
                json!({"delete": {"_id": "2"}}),
            ]
        );
    }

    #[test]
    fn test_parse_bulk_array() {
        let values = parse_bulk_values(r#"[{"delete": {"_id": "1"}}]"#).unwrap();
        assert_eq!(values, vec![json!({"delete": {"_id": "1"}})]);
    }

    #[test]
    fn test_parse_bulk_reports_line() {
        let err = parse_bulk_values("{}\n{oops}\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
