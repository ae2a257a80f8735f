// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

#![allow(dead_code)]

use async_trait::async_trait;
use es_toolkit::models::engine::{EngineHit, EngineSearchResponse, SearchScope};
use es_toolkit::services::engine::{EngineError, SearchEngine};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

/// A search call as received by the engine
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub scope: SearchScope,
    pub body: Value,
    pub query_then_fetch: bool,
}

/// In-memory engine: stores indexes and documents, records search bodies and
/// answers every search with a canned response.
#[derive(Default)]
pub struct RecordingEngine {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    indexes: BTreeSet<String>,
    documents: HashMap<(String, String, String), Map<String, Value>>,
    next_id: u64,
    searches: Vec<RecordedSearch>,
    search_response: Option<EngineSearchResponse>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_response(response: EngineSearchResponse) -> Self {
        let engine = Self::default();
        engine.state.lock().unwrap().search_response = Some(response);
        engine
    }

    pub fn searches(&self) -> Vec<RecordedSearch> {
        self.state.lock().unwrap().searches.clone()
    }

    pub fn last_search(&self) -> RecordedSearch {
        self.searches().pop().expect("no search was executed")
    }
}

fn key(index: &str, doc_type: &str, id: &str) -> (String, String, String) {
    (index.to_string(), doc_type.to_string(), id.to_string())
}

#[async_trait]
impl SearchEngine for RecordingEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        Ok(self.state.lock().unwrap().indexes.contains(index))
    }

    async fn create_index(&self, index: &str) -> Result<bool, EngineError> {
        Ok(self.state.lock().unwrap().indexes.insert(index.to_string()))
    }

    async fn delete_index(&self, index: &str) -> Result<bool, EngineError> {
        let mut state = self.state.lock().unwrap();
        state.documents.retain(|(i, _, _), _| i != index);
        Ok(state.indexes.remove(index))
    }

    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        source: &Map<String, Value>,
    ) -> Result<String, EngineError> {
        let mut state = self.state.lock().unwrap();
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                state.next_id += 1;
                format!("auto-{}", state.next_id)
            }
        };
        state.indexes.insert(index.to_string());
        state
            .documents
            .insert(key(index, doc_type, &id), source.clone());
        Ok(id)
    }

    async fn update_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        partial: &Map<String, Value>,
    ) -> Result<String, EngineError> {
        let mut state = self.state.lock().unwrap();
        let Some(doc) = state.documents.get_mut(&key(index, doc_type, id)) else {
            return Err(EngineError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            });
        };
        for (field, value) in partial {
            doc.insert(field.clone(), value.clone());
        }
        Ok(id.to_string())
    }

    async fn delete_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
    ) -> Result<String, EngineError> {
        self.state
            .lock()
            .unwrap()
            .documents
            .remove(&key(index, doc_type, id));
        Ok(id.to_string())
    }

    async fn get_document(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
    ) -> Result<Option<String>, EngineError> {
        let state = self.state.lock().unwrap();
        state
            .documents
            .get(&key(index, doc_type, id))
            .map(serde_json::to_string)
            .transpose()
            .map_err(EngineError::from)
    }

    async fn search(
        &self,
        scope: &SearchScope,
        body: &Value,
        query_then_fetch: bool,
    ) -> Result<EngineSearchResponse, EngineError> {
        let mut state = self.state.lock().unwrap();
        state.searches.push(RecordedSearch {
            scope: scope.clone(),
            body: body.clone(),
            query_then_fetch,
        });
        Ok(state
            .search_response
            .clone()
            .unwrap_or_else(|| EngineSearchResponse {
                status: 200,
                ..Default::default()
            }))
    }
}

/// Successful response with the given total and hits
pub fn ok_response(total_hits: u64, hits: Vec<EngineHit>) -> EngineSearchResponse {
    EngineSearchResponse {
        status: 200,
        total_hits,
        hits,
    }
}

/// Hit with a JSON object source and optional highlight fragments for one field
pub fn hit(id: &str, source: Value, highlight: Option<(&str, &[&str])>) -> EngineHit {
    EngineHit {
        id: id.to_string(),
        source: source.as_object().cloned().unwrap_or_default(),
        highlight: highlight
            .map(|(field, frags)| {
                HashMap::from([(
                    field.to_string(),
                    frags.iter().map(|f| f.to_string()).collect(),
                )])
            })
            .unwrap_or_default(),
    }
}

pub fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
