// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single search hit flattened into its source fields, with `id` injected.
pub type NormalizedHit = serde_json::Map<String, serde_json::Value>;

/// Sort direction for the single-field sort clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to search one or more indexes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    /// Comma-separated index names (required, empty yields no result)
    pub indexes: String,
    /// Comma-separated type names
    pub types: Option<String>,
    /// Lower bound of the `processTime` range (epoch millis)
    pub start_time: Option<i64>,
    /// Upper bound of the `processTime` range (epoch millis)
    pub end_time: Option<i64>,
    /// Field -> value criteria, all of which must match
    pub match_criteria: BTreeMap<String, String>,
    /// `true` selects phrase matching, `false` tokenized matching
    pub match_phrase: bool,
    /// Field whose highlight fragments replace the source value
    pub highlight_field: Option<String>,
    /// Comma-separated list of source fields to return (all when absent)
    pub fields: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<SortOrder>,
    /// Result cap, ignored when not positive
    pub size: Option<i64>,
}

impl SearchRequest {
    /// Convenience constructor targeting the given comma-separated indexes
    pub fn for_indexes(indexes: impl Into<String>) -> Self {
        Self {
            indexes: indexes.into(),
            ..Default::default()
        }
    }

    pub fn with_criterion(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.match_criteria.insert(field.into(), value.into());
        self
    }

    /// The time range applies only when both bounds are present and positive
    pub fn time_range(&self) -> Option<(i64, i64)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if start > 0 && end > 0 => Some((start, end)),
            _ => None,
        }
    }

    pub fn effective_size(&self) -> Option<i64> {
        self.size.filter(|size| *size > 0)
    }
}

/// Request for a single page of results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedSearchRequest {
    #[serde(flatten)]
    pub request: SearchRequest,
    /// 1-based page number
    pub page_num: u32,
    pub page_size: u32,
}

/// Splits a comma-separated list, dropping blank parts
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`split_list`] for optional input
pub fn split_optional_list(value: Option<&str>) -> Vec<String> {
    value.map(split_list).unwrap_or_default()
}
