// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::search::{split_list, split_optional_list};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Indexes and types a search is executed against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchScope {
    pub indexes: Vec<String>,
    pub types: Vec<String>,
}

impl SearchScope {
    /// Build a scope from comma-separated index and type lists
    pub fn parse(indexes: &str, types: Option<&str>) -> Self {
        Self {
            indexes: split_list(indexes),
            types: split_optional_list(types),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Search outcome as reported by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSearchResponse {
    /// HTTP-style status code of the search call
    pub status: u16,
    /// Total number of matches, independent of the returned window
    pub total_hits: u64,
    pub hits: Vec<EngineHit>,
}

impl EngineSearchResponse {
    /// A response for a search the engine rejected
    pub fn failed(status: u16) -> Self {
        Self {
            status,
            total_hits: 0,
            hits: Vec::new(),
        }
    }

    /// Any 2xx status counts; proxies in front of the engine may answer with codes other than 200
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A raw hit before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineHit {
    pub id: String,
    pub source: serde_json::Map<String, serde_json::Value>,
    /// Highlight fragments per field, in engine order
    pub highlight: HashMap<String, Vec<String>>,
}
