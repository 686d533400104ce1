use quarry_rs::{
    BulkMeta, BulkOperation, Client, CreateIndexOptions, ErrorKind, SearchOptions,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> Client {
    Client::new(server.uri()).expect("Failed to create client")
}

#[tokio::test]
async fn test_search_round_trip() {
    let server = MockServer::start().await;
    let query = json!({"query": {"match": {"name": "Fury"}}});
    let response = json!({
        "took": 3,
        "hits": {"total": 1, "max_score": 1.0, "hits": [{"_index": "movies", "_id": "1", "_source": {"name": "Fury"}}]}
    });

    Mock::given(method("POST"))
        .and(path("/movies/_search"))
        .and(header("content-type", "application/json"))
        .and(body_json(&query))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .search(&SearchOptions::index("movies"), query)
        .await
        .unwrap();

    assert_eq!(result, response);
}

#[tokio::test]
async fn test_bulk_body_is_ndjson_with_trailing_newline() {
    let server = MockServer::start().await;
    let expected = "{\"index\":{\"_index\":\"movies\",\"_id\":\"1\"}}\n{\"name\":\"Fury\"}\n";

    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .and(header("content-type", "application/x-ndjson"))
        .and(body_string(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": false, "items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let ops = vec![BulkOperation::index(
        BulkMeta::new().index("movies").id("1"),
        json!({"name": "Fury"}),
    )];

    let result = client.bulk(&ops).await.unwrap();
    assert_eq!(result["errors"], false);
}

#[tokio::test]
async fn test_create_index_conflict() {
    let server = MockServer::start().await;
    let conflict = json!({"error": "IndexAlreadyExistsException[[x] already exists]", "status": 400});

    Mock::given(method("PUT"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&conflict))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let err = client.create_index("x", None).await.unwrap_err();
    assert!(err.is_index_already_exists());
    assert_eq!(err.index(), Some("x"));

    let body = client
        .create_index_with_options("x", None, CreateIndexOptions { throw_if_exists: false })
        .await
        .unwrap();
    assert_eq!(body, conflict);
}

#[tokio::test]
async fn test_structured_index_not_found() {
    let server = MockServer::start().await;
    let missing = json!({
        "error": {"type": "index_not_found_exception", "reason": "no such index [movies]"},
        "status": 404
    });

    Mock::given(method("GET"))
        .and(path("/movies/_mapping"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&missing))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_mapping(&quarry_rs::MappingOptions::index("movies"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IndexMissing);
    assert_eq!(err.body(), &missing);
}

#[tokio::test]
async fn test_non_json_error_page_is_generic() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.delete_index("movies").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.body(), &json!("<html>Bad Gateway</html>"));
}

#[tokio::test]
async fn test_connection_refused_is_generic() {
    // Nothing listens on port 9 (discard) in the test environment
    let client = Client::new("http://127.0.0.1:9").unwrap();
    let err = client.refresh("movies").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_concurrent_requests_share_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movies/movie/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "1", "found": true})))
        .expect(8)
        .mount(&server)
        .await;

    let client = std::sync::Arc::new(client_for(&server).await);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get_document("movies", "movie", "1").await })
        })
        .collect();

    for handle in handles {
        let doc = handle.await.unwrap().unwrap();
        assert_eq!(doc["found"], true);
    }
}
