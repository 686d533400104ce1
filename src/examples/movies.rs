//! Movies Example
//!
//! Creates an index, stores a few documents, and searches them.
//! Needs an engine listening on http://localhost:9200.
//!
//! Run with: cargo run -p quarry-rs --example movies

use quarry_rs::{Client, CreateIndexOptions, MappingOptions, SearchOptions};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Quarry Movies Example\n");

    let client = Client::localhost()?;
    println!("✅ Client targeting {}\n", client.host());

    // Keep an existing index around between runs
    let created = client
        .create_index_with_options(
            "movies",
            Some(json!({"settings": {"number_of_shards": 1, "number_of_replicas": 0}})),
            CreateIndexOptions { throw_if_exists: false },
        )
        .await?;
    println!("📁 create_index: {}", created);

    client
        .put_mapping(
            "movies",
            "movie",
            json!({"movie": {"properties": {"name": {"type": "string"}, "year": {"type": "integer"}}}}),
        )
        .await?;

    for (id, name, year) in [("1", "Fury", 2014), ("2", "Heat", 1995), ("3", "Ronin", 1998)] {
        client
            .index_document("movies", "movie", Some(id), json!({"name": name, "year": year}))
            .await?;
        println!("📝 Indexed {} ({})", name, year);
    }

    client.refresh("movies").await?;

    let mapping = client.get_mapping(&MappingOptions::index("movies")).await?;
    println!("\n🗺️  Mapping: {}", mapping);

    let results = client
        .search(
            &SearchOptions::index("movies"),
            json!({"query": {"match": {"name": "Fury"}}}),
        )
        .await?;

    println!("\n🔍 Search results for 'Fury':");
    if let Some(hits) = results["hits"]["hits"].as_array() {
        for (i, hit) in hits.iter().enumerate() {
            println!("   {}. {} (score: {})", i + 1, hit["_source"]["name"], hit["_score"]);
            println!("      ID: {}", hit["_id"]);
        }
    }

    match client.delete_index("movies_archive").await {
        Ok(_) => println!("\n🗑️  Deleted movies_archive"),
        Err(e) if e.is_index_missing() => println!("\nℹ️  movies_archive does not exist"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
