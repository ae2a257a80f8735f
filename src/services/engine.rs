// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! The document-search engine as seen by the rest of the crate.

use crate::models::engine::{EngineSearchResponse, SearchScope};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Type name used when the caller does not scope a document to a type
pub const DEFAULT_DOC_TYPE: &str = "_doc";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Document '{id}' not found in index '{index}'")]
    DocumentNotFound { index: String, id: String },

    #[error("Engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Engine responded with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to decode engine response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid engine URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Operations consumed from the external search engine.
///
/// Absence is never an error here: missing indexes and documents are reported
/// through the return values. The only exception is a partial update of a
/// missing document, which fails with [`EngineError::DocumentNotFound`].
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn index_exists(&self, index: &str) -> Result<bool, EngineError>;

    /// Returns whether the engine acknowledged the creation
    async fn create_index(&self, index: &str) -> Result<bool, EngineError>;

    /// Returns whether the engine acknowledged the deletion
    async fn delete_index(&self, index: &str) -> Result<bool, EngineError>;

    /// Index (upsert) a document, letting the engine assign an ID when `id` is `None`.
    /// Returns the effective ID.
    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        source: &Map<String, Value>,
    ) -> Result<String, EngineError>;

    /// Merge `partial` into an existing document
    async fn update_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        partial: &Map<String, Value>,
    ) -> Result<String, EngineError>;

    async fn delete_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
    ) -> Result<String, EngineError>;

    /// Stored `_source` exactly as the engine returned it
    async fn get_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
    ) -> Result<Option<String>, EngineError>;

    /// Execute a search request body. `query_then_fetch` pins the engine's search type.
    async fn search(
        &self,
        scope: &SearchScope,
        body: &Value,
        query_then_fetch: bool,
    ) -> Result<EngineSearchResponse, EngineError>;
}

/// Resolves an optional caller-supplied type to the one sent to the engine
pub fn effective_doc_type(doc_type: Option<&str>) -> &str {
    match doc_type.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_DOC_TYPE,
    }
}
