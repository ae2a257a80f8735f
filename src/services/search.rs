// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::engine::SearchScope;
use crate::models::page::PageResult;
use crate::models::paging::PagingMode;
use crate::models::search::{NormalizedHit, PagedSearchRequest, SearchRequest};
use crate::services::engine::{effective_doc_type, EngineError, SearchEngine};
use crate::services::logging::{truncate_for_log, MAX_LOGGED_BODY_CHARS};
use crate::services::normalize::normalize_hits;
use crate::services::query::QueryAssembler;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Index lifecycle, document CRUD and search on top of a [`SearchEngine`].
///
/// Cheap to clone; every clone shares the same engine handle.
#[derive(Clone)]
pub struct SearchClient {
    engine: Arc<dyn SearchEngine>,
    paging_mode: PagingMode,
}

impl SearchClient {
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self::with_paging_mode(engine, PagingMode::default())
    }

    pub fn with_paging_mode(engine: Arc<dyn SearchEngine>, paging_mode: PagingMode) -> Self {
        Self {
            engine,
            paging_mode,
        }
    }

    pub fn paging_mode(&self) -> PagingMode {
        self.paging_mode
    }

    // -----------------------------------------------------------------------
    // Index lifecycle
    // -----------------------------------------------------------------------

    pub async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        let exists = self.engine.index_exists(index).await?;
        if exists {
            tracing::info!(index, "Index exists");
        } else {
            tracing::info!(index, "Index does not exist");
        }
        Ok(exists)
    }

    /// Create an index, returning the engine acknowledgment
    pub async fn create_index(&self, index: &str) -> Result<bool, EngineError> {
        if !self.index_exists(index).await? {
            tracing::info!(index, "Creating missing index");
        }
        self.engine.create_index(index).await
    }

    /// Delete an index, returning the engine acknowledgment
    pub async fn delete_index(&self, index: &str) -> Result<bool, EngineError> {
        if !self.index_exists(index).await? {
            tracing::info!(index, "Deleting index that does not exist");
        }
        self.engine.delete_index(index).await
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// Upsert a document at `id`, returning the effective ID
    pub async fn create_document(
        &self,
        index: &str,
        doc_type: Option<&str>,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, EngineError> {
        let id = self
            .engine
            .index_document(index, effective_doc_type(doc_type), Some(id), fields)
            .await?;
        tracing::info!(index, id = %id, "Document indexed");
        Ok(id)
    }

    /// Index a document under an engine-assigned ID and return it
    pub async fn create_document_without_id(
        &self,
        index: &str,
        doc_type: Option<&str>,
        fields: &Map<String, Value>,
    ) -> Result<String, EngineError> {
        let id = self
            .engine
            .index_document(index, effective_doc_type(doc_type), None, fields)
            .await?;
        tracing::info!(index, id = %id, "Document indexed with generated id");
        Ok(id)
    }

    /// Merge `partial_fields` into an existing document.
    /// Fails with [`EngineError::DocumentNotFound`] when the document is missing.
    pub async fn update_document(
        &self,
        index: &str,
        doc_type: Option<&str>,
        id: &str,
        partial_fields: &Map<String, Value>,
    ) -> Result<String, EngineError> {
        let id = self
            .engine
            .update_document(index, effective_doc_type(doc_type), id, partial_fields)
            .await?;
        tracing::info!(index, id = %id, fields = partial_fields.len(), "Document updated");
        Ok(id)
    }

    /// Delete a document; deleting a missing document is not an error
    pub async fn delete_document(
        &self,
        index: &str,
        doc_type: Option<&str>,
        id: &str,
    ) -> Result<String, EngineError> {
        let id = self
            .engine
            .delete_document(index, effective_doc_type(doc_type), id)
            .await?;
        tracing::info!(index, id = %id, "Document deleted");
        Ok(id)
    }

    /// Raw JSON source of the document, `None` when it does not exist
    pub async fn get_document_by_id(
        &self,
        index: &str,
        doc_type: Option<&str>,
        id: &str,
    ) -> Result<Option<String>, EngineError> {
        let source = self
            .engine
            .get_document(index, effective_doc_type(doc_type), id)
            .await?;
        tracing::info!(index, id, found = source.is_some(), "Document fetched");
        Ok(source)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Search the requested indexes.
    ///
    /// `None` when no index is given or the engine rejects the search.
    pub async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Option<Vec<NormalizedHit>>, EngineError> {
        let scope = SearchScope::parse(&request.indexes, request.types.as_deref());
        if scope.is_empty() {
            return Ok(None);
        }

        let body = QueryAssembler::build_search_body(request);
        tracing::debug!(
            indexes = ?scope.indexes,
            body = %truncate_for_log(&body, MAX_LOGGED_BODY_CHARS),
            "Executing search"
        );

        let response = self.engine.search(&scope, &body, false).await?;
        tracing::info!(
            total_hits = response.total_hits,
            returned = response.hits.len(),
            status = response.status,
            "Search finished"
        );

        if !response.is_success() {
            return Ok(None);
        }

        Ok(Some(normalize_hits(
            response.hits,
            request.highlight_field.as_deref(),
        )))
    }

    /// Fetch one page of results wrapped with pager bookkeeping.
    ///
    /// `None` when no index is given, `page_size` is zero, or the engine
    /// rejects the search. How the request maps to the engine query depends on
    /// the configured [`PagingMode`].
    pub async fn search_paged(
        &self,
        paged: &PagedSearchRequest,
    ) -> Result<Option<PageResult>, EngineError> {
        let request = &paged.request;
        let scope = SearchScope::parse(&request.indexes, request.types.as_deref());
        if scope.is_empty() || paged.page_size == 0 {
            return Ok(None);
        }

        let body = QueryAssembler::build_paged_body(
            request,
            paged.page_num,
            paged.page_size,
            self.paging_mode,
        );
        tracing::debug!(
            indexes = ?scope.indexes,
            paging_mode = %self.paging_mode,
            body = %truncate_for_log(&body, MAX_LOGGED_BODY_CHARS),
            "Executing paged search"
        );

        let response = self.engine.search(&scope, &body, true).await?;
        tracing::info!(
            total_hits = response.total_hits,
            returned = response.hits.len(),
            status = response.status,
            "Paged search finished"
        );

        if !response.is_success() {
            return Ok(None);
        }

        let hits = normalize_hits(response.hits, request.highlight_field.as_deref());
        Ok(Some(PageResult::new(
            paged.page_num,
            paged.page_size,
            response.total_hits,
            hits,
        )))
    }
}
