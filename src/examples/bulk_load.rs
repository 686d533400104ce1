//! Bulk Load Example
//!
//! Loads documents through the bulk endpoint and reports per-item failures.
//!
//! Run with: cargo run -p quarry-rs --example bulk_load

use quarry_rs::{BulkMeta, BulkOperation, BulkOptions, Client, SearchOptions};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Quarry Bulk Load Example\n");

    let client = Client::localhost()?;

    let titles = ["Alien", "Aliens", "Alien 3", "Prometheus", "Covenant"];
    let mut operations: Vec<BulkOperation> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            BulkOperation::index(
                BulkMeta::new().id((i + 1).to_string()),
                json!({"name": title}),
            )
        })
        .collect();

    // Entries run in order: this removes the document indexed above
    operations.push(BulkOperation::delete(BulkMeta::new().id("3")));

    let options = BulkOptions {
        index: Some("films".to_string()),
        doc_type: Some("film".to_string()),
    };
    let result = client.bulk_with_options(&operations, &options).await?;

    let items = result["items"].as_array().map(Vec::len).unwrap_or(0);
    println!("📦 Submitted {} operations, engine reported {} items", operations.len(), items);
    if result["errors"].as_bool().unwrap_or(false) {
        println!("⚠️  Some items failed:");
        for item in result["items"].as_array().into_iter().flatten() {
            if let Some((action, status)) = item.as_object().and_then(|o| o.iter().next()) {
                if status.get("error").is_some() {
                    println!("   {} {}: {}", action, status["_id"], status["error"]);
                }
            }
        }
    }

    client.refresh("films").await?;
    let count = client.count(&SearchOptions::index("films"), None).await?;
    println!("🔢 films now holds {} documents", count["count"]);

    Ok(())
}
