// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

mod common;

use common::{fields, hit, ok_response, RecordingEngine};
use es_toolkit::models::engine::EngineSearchResponse;
use es_toolkit::models::paging::PagingMode;
use es_toolkit::models::search::{PagedSearchRequest, SearchRequest, SortOrder};
use es_toolkit::services::engine::EngineError;
use es_toolkit::services::search::SearchClient;
use serde_json::json;
use std::sync::Arc;

fn client_with(engine: &Arc<RecordingEngine>, mode: PagingMode) -> SearchClient {
    SearchClient::with_paging_mode(engine.clone(), mode)
}

fn paged(request: SearchRequest, page_num: u32, page_size: u32) -> PagedSearchRequest {
    PagedSearchRequest {
        request,
        page_num,
        page_size,
    }
}

// ---------------------------------------------------------------------------
// Index lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_index_lifecycle() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    assert!(!client.index_exists("cars").await.unwrap());
    assert!(client.create_index("cars").await.unwrap());
    assert!(client.index_exists("cars").await.unwrap());

    // Existing index is not an error, the engine just does not acknowledge
    assert!(!client.create_index("cars").await.unwrap());

    assert!(client.delete_index("cars").await.unwrap());
    assert!(!client.index_exists("cars").await.unwrap());
    assert!(!client.delete_index("cars").await.unwrap());
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_then_get_returns_exactly_written_fields() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let doc = fields(json!({ "brand": "bmw", "price": 320000, "tags": ["sedan"] }));
    let id = client
        .create_document("cars", Some("sales"), "1", &doc)
        .await
        .unwrap();
    assert_eq!(id, "1");

    let raw = client
        .get_document_by_id("cars", Some("sales"), "1")
        .await
        .unwrap()
        .expect("document should exist");
    let fetched: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(fetched, doc);
}

#[tokio::test]
async fn test_create_with_existing_id_upserts() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    client
        .create_document("cars", None, "1", &fields(json!({ "brand": "bmw" })))
        .await
        .unwrap();
    client
        .create_document("cars", None, "1", &fields(json!({ "brand": "audi" })))
        .await
        .unwrap();

    let raw = client
        .get_document_by_id("cars", None, "1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw, r#"{"brand":"audi"}"#);
}

#[tokio::test]
async fn test_get_keeps_written_field_order() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    client
        .create_document("cars", None, "1", &fields(json!({ "zeta": 1, "alpha": 2 })))
        .await
        .unwrap();

    let raw = client
        .get_document_by_id("cars", None, "1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw, r#"{"zeta":1,"alpha":2}"#);
}

#[tokio::test]
async fn test_create_without_id_returns_generated_id() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let id = client
        .create_document_without_id("cars", None, &fields(json!({ "brand": "bmw" })))
        .await
        .unwrap();
    assert!(!id.is_empty());

    let found = client.get_document_by_id("cars", None, &id).await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn test_update_merges_partial_fields() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    client
        .create_document(
            "cars",
            None,
            "1",
            &fields(json!({ "brand": "bmw", "price": 100 })),
        )
        .await
        .unwrap();

    let id = client
        .update_document("cars", None, "1", &fields(json!({ "price": 90 })))
        .await
        .unwrap();
    assert_eq!(id, "1");

    let raw = client
        .get_document_by_id("cars", None, "1")
        .await
        .unwrap()
        .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc, json!({ "brand": "bmw", "price": 90 }));
}

#[tokio::test]
async fn test_update_missing_document_fails_with_not_found() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let err = client
        .update_document("cars", None, "404", &fields(json!({ "price": 1 })))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::DocumentNotFound { ref id, .. } if id == "404"));
}

#[tokio::test]
async fn test_delete_absent_document_returns_id() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let id = client.delete_document("cars", None, "ghost").await.unwrap();
    assert_eq!(id, "ghost");
}

#[tokio::test]
async fn test_delete_then_get_is_empty() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    client
        .create_document("cars", None, "1", &fields(json!({ "brand": "bmw" })))
        .await
        .unwrap();
    client.delete_document("cars", None, "1").await.unwrap();

    assert!(client
        .get_document_by_id("cars", None, "1")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_types_scope_documents() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    client
        .create_document("cars", Some("sales"), "1", &fields(json!({ "brand": "bmw" })))
        .await
        .unwrap();

    assert!(client
        .get_document_by_id("cars", Some("stock"), "1")
        .await
        .unwrap()
        .is_none());
    // Blank type falls back to the default type, not "sales"
    assert!(client
        .get_document_by_id("cars", Some(""), "1")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_without_indexes_short_circuits() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let result = client
        .search(&SearchRequest::for_indexes("").with_criterion("brand", "bmw"))
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(engine.searches().is_empty());
}

#[tokio::test]
async fn test_search_normalizes_hits() {
    let engine = Arc::new(RecordingEngine::with_search_response(ok_response(
        2,
        vec![
            hit(
                "1",
                json!({ "brand": "bmw x5", "price": 1 }),
                Some(("brand", &["<em>bmw</em>", " x5"])),
            ),
            hit("2", json!({ "brand": "bmw 320", "price": 2 }), None),
        ],
    )));
    let client = SearchClient::new(engine.clone());

    let mut req = SearchRequest::for_indexes("cars").with_criterion("brand", "bmw");
    req.highlight_field = Some("brand".to_string());

    let hits = client.search(&req).await.unwrap().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["id"], json!("1"));
    assert_eq!(hits[0]["brand"], json!("<em>bmw</em> x5"));
    assert_eq!(hits[1]["id"], json!("2"));
    assert_eq!(hits[1]["brand"], json!("bmw 320"));
}

#[tokio::test]
async fn test_search_sends_assembled_query() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let mut req = SearchRequest::for_indexes("cars,trucks")
        .with_criterion("brand", "bmw")
        .with_criterion("color", " ");
    req.types = Some("sales".to_string());
    req.match_phrase = true;
    req.sort_field = Some("price".to_string());
    req.sort_order = Some(SortOrder::Desc);
    req.fields = Some("brand,price".to_string());
    req.size = Some(3);

    client.search(&req).await.unwrap();

    let recorded = engine.last_search();
    assert_eq!(recorded.scope.indexes, vec!["cars", "trucks"]);
    assert_eq!(recorded.scope.types, vec!["sales"]);
    assert!(!recorded.query_then_fetch);
    assert_eq!(
        recorded.body,
        json!({
            "query": { "bool": { "must": [ { "match_phrase": { "brand": "bmw" } } ] } },
            "_source": { "includes": ["brand", "price"] },
            "sort": [ { "price": { "order": "desc" } } ],
            "size": 3,
            "track_total_hits": true,
        })
    );
}

#[tokio::test]
async fn test_search_rejected_by_engine_is_absent() {
    let engine = Arc::new(RecordingEngine::with_search_response(
        EngineSearchResponse::failed(503),
    ));
    let client = SearchClient::new(engine.clone());

    let result = client.search(&SearchRequest::for_indexes("cars")).await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Paged search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_legacy_paged_search_matches_all_with_raw_offset() {
    let engine = Arc::new(RecordingEngine::with_search_response(ok_response(
        105,
        vec![hit("1", json!({ "brand": "bmw" }), None)],
    )));
    let client = client_with(&engine, PagingMode::Legacy);

    let mut req = SearchRequest::for_indexes("cars").with_criterion("brand", "bmw");
    req.size = Some(3);
    req.sort_field = Some("price".to_string());

    let page = client
        .search_paged(&paged(req, 11, 10))
        .await
        .unwrap()
        .unwrap();

    let recorded = engine.last_search();
    assert!(recorded.query_then_fetch);
    assert_eq!(recorded.body["query"], json!({ "match_all": {} }));
    assert_eq!(recorded.body["from"], json!(11));
    assert_eq!(recorded.body["size"], json!(10));
    assert_eq!(recorded.body["sort"], json!([{ "price": { "order": "asc" } }]));

    // Total is the unpaginated hit count, not the page length
    assert_eq!(page.total, 105);
    assert_eq!(page.r_list.len(), 1);
    assert_eq!(page.page_count, 11);
    assert_eq!((page.begin_page_index, page.end_page_index), (2, 11));
}

#[tokio::test]
async fn test_corrected_paged_search_keeps_filters() {
    let engine = Arc::new(RecordingEngine::with_search_response(ok_response(200, vec![])));
    let client = client_with(&engine, PagingMode::Corrected);

    let req = SearchRequest::for_indexes("cars").with_criterion("brand", "bmw");
    let page = client
        .search_paged(&paged(req, 10, 10))
        .await
        .unwrap()
        .unwrap();

    let recorded = engine.last_search();
    assert!(recorded.query_then_fetch);
    assert_eq!(
        recorded.body["query"],
        json!({ "bool": { "must": [ { "match": { "brand": "bmw" } } ] } })
    );
    assert_eq!(recorded.body["from"], json!(90));
    assert_eq!(recorded.body["size"], json!(10));

    assert_eq!(page.page_count, 20);
    assert_eq!((page.begin_page_index, page.end_page_index), (6, 15));
}

#[tokio::test]
async fn test_paged_search_short_circuits() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let empty_indexes = client
        .search_paged(&paged(SearchRequest::for_indexes(""), 1, 10))
        .await
        .unwrap();
    assert!(empty_indexes.is_none());

    let zero_page_size = client
        .search_paged(&paged(SearchRequest::for_indexes("cars"), 1, 0))
        .await
        .unwrap();
    assert!(zero_page_size.is_none());

    assert!(engine.searches().is_empty());
}

#[tokio::test]
async fn test_paged_search_rejected_by_engine_is_absent() {
    let engine = Arc::new(RecordingEngine::with_search_response(
        EngineSearchResponse::failed(500),
    ));
    let client = SearchClient::new(engine.clone());

    let page = client
        .search_paged(&paged(SearchRequest::for_indexes("cars"), 1, 10))
        .await
        .unwrap();
    assert!(page.is_none());
}

#[tokio::test]
async fn test_paged_search_without_hits() {
    let engine = Arc::new(RecordingEngine::new());
    let client = SearchClient::new(engine.clone());

    let page = client
        .search_paged(&paged(SearchRequest::for_indexes("cars"), 1, 10))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(page.total, 0);
    assert_eq!(page.page_count, 0);
    assert!(page.r_list.is_empty());
}
