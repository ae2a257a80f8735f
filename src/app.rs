// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::document::{
    AcknowledgedResponse, DocumentIdResponse, DocumentSourceResponse, DocumentTypeQuery,
    IndexExistsResponse,
};
use crate::models::page::PageResult;
use crate::models::search::{NormalizedHit, PagedSearchRequest, SearchRequest};
use crate::models::version::VersionResponse;
use crate::services::engine::EngineError;
use crate::services::search::SearchClient;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `ES_TOOLKIT_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("ES_TOOLKIT_VERSION");

type ApiError = (StatusCode, String);

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub search_client: SearchClient,
}

fn engine_error(e: EngineError) -> ApiError {
    match e {
        EngineError::DocumentNotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        _ => (StatusCode::BAD_GATEWAY, format!("Search engine error: {e}")),
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

pub async fn version_handler(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "es-toolkit".to_string(),
        version: VERSION.to_string(),
        paging_mode: state.search_client.paging_mode().to_string(),
    })
}

pub async fn index_exists_handler(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<IndexExistsResponse>, ApiError> {
    let exists = state
        .search_client
        .index_exists(&index)
        .await
        .map_err(engine_error)?;

    Ok(Json(IndexExistsResponse { index, exists }))
}

pub async fn create_index_handler(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<AcknowledgedResponse>, ApiError> {
    let acknowledged = state
        .search_client
        .create_index(&index)
        .await
        .map_err(engine_error)?;

    Ok(Json(AcknowledgedResponse {
        index,
        acknowledged,
    }))
}

pub async fn delete_index_handler(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<AcknowledgedResponse>, ApiError> {
    let acknowledged = state
        .search_client
        .delete_index(&index)
        .await
        .map_err(engine_error)?;

    Ok(Json(AcknowledgedResponse {
        index,
        acknowledged,
    }))
}

pub async fn create_document_without_id_handler(
    State(state): State<AppState>,
    Path(index): Path<String>,
    Query(query): Query<DocumentTypeQuery>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<DocumentIdResponse>, ApiError> {
    let id = state
        .search_client
        .create_document_without_id(&index, query.doc_type.as_deref(), &fields)
        .await
        .map_err(engine_error)?;

    Ok(Json(DocumentIdResponse { id }))
}

pub async fn create_document_handler(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    Query(query): Query<DocumentTypeQuery>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<DocumentIdResponse>, ApiError> {
    let id = state
        .search_client
        .create_document(&index, query.doc_type.as_deref(), &id, &fields)
        .await
        .map_err(engine_error)?;

    Ok(Json(DocumentIdResponse { id }))
}

pub async fn update_document_handler(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    Query(query): Query<DocumentTypeQuery>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<DocumentIdResponse>, ApiError> {
    let id = state
        .search_client
        .update_document(&index, query.doc_type.as_deref(), &id, &fields)
        .await
        .map_err(engine_error)?;

    Ok(Json(DocumentIdResponse { id }))
}

pub async fn delete_document_handler(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    Query(query): Query<DocumentTypeQuery>,
) -> Result<Json<DocumentIdResponse>, ApiError> {
    let id = state
        .search_client
        .delete_document(&index, query.doc_type.as_deref(), &id)
        .await
        .map_err(engine_error)?;

    Ok(Json(DocumentIdResponse { id }))
}

pub async fn get_document_handler(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    Query(query): Query<DocumentTypeQuery>,
) -> Result<Json<DocumentSourceResponse>, ApiError> {
    let source = state
        .search_client
        .get_document_by_id(&index, query.doc_type.as_deref(), &id)
        .await
        .map_err(engine_error)?;

    Ok(Json(DocumentSourceResponse {
        id,
        found: source.is_some(),
        source,
    }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<Option<Vec<NormalizedHit>>>, ApiError> {
    state
        .search_client
        .search(&payload)
        .await
        .map(Json)
        .map_err(engine_error)
}

pub async fn search_paged_handler(
    State(state): State<AppState>,
    Json(payload): Json<PagedSearchRequest>,
) -> Result<Json<Option<PageResult>>, ApiError> {
    state
        .search_client
        .search_paged(&payload)
        .await
        .map(Json)
        .map_err(engine_error)
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route(
            "/indexes/{index}",
            get(index_exists_handler)
                .put(create_index_handler)
                .delete(delete_index_handler),
        )
        .route(
            "/indexes/{index}/documents",
            post(create_document_without_id_handler),
        )
        .route(
            "/indexes/{index}/documents/{id}",
            get(get_document_handler)
                .put(create_document_handler)
                .patch(update_document_handler)
                .delete(delete_document_handler),
        )
        .route("/search", post(search_handler))
        .route("/search/paged", post(search_paged_handler))
        .with_state(state)
}
