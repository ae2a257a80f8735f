// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Translates search requests into Elasticsearch query DSL bodies.

use crate::models::paging::PagingMode;
use crate::models::search::{split_list, SearchRequest, SortOrder};
use serde_json::{json, Value};

/// Field the time range clause applies to
pub const TIME_RANGE_FIELD: &str = "processTime";

pub struct QueryAssembler;

impl QueryAssembler {
    /// Body for a plain search: filter query, highlight, projection, sort and size cap
    pub fn build_search_body(req: &SearchRequest) -> Value {
        let mut body = json!({
            "query": Self::bool_query(req),
            "track_total_hits": true,
        });

        Self::apply_common(&mut body, req);

        if let Some(size) = req.effective_size() {
            body["size"] = json!(size);
        }

        body
    }

    /// Body for a paged search. The size cap of the request is ignored.
    /// Totals are tracked exactly since the page count is derived from them.
    pub fn build_paged_body(
        req: &SearchRequest,
        page_num: u32,
        page_size: u32,
        mode: PagingMode,
    ) -> Value {
        let mut body = json!({
            "query": Self::bool_query(req),
            "track_total_hits": true,
        });

        Self::apply_common(&mut body, req);

        match mode {
            PagingMode::Legacy => {
                body["query"] = json!({ "match_all": {} });
                body["from"] = json!(page_num);
                body["explain"] = json!(true);
            }
            PagingMode::Corrected => {
                body["from"] = json!(Self::page_offset(page_num, page_size));
            }
        }
        body["size"] = json!(page_size);

        body
    }

    /// Zero-based offset of a 1-based page
    pub fn page_offset(page_num: u32, page_size: u32) -> u64 {
        u64::from(page_num.max(1) - 1) * u64::from(page_size)
    }

    /// Conjunction of the time range and every non-blank match criterion
    pub fn bool_query(req: &SearchRequest) -> Value {
        let mut must = Vec::new();

        if let Some((start, end)) = req.time_range() {
            must.push(Self::time_range_clause(start, end));
        }

        for (field, value) in &req.match_criteria {
            if field.trim().is_empty() || value.trim().is_empty() {
                continue;
            }
            must.push(Self::match_clause(field, value, req.match_phrase));
        }

        json!({
            "bool": {
                "must": must,
            }
        })
    }

    fn time_range_clause(start: i64, end: i64) -> Value {
        json!({
            "range": {
                TIME_RANGE_FIELD: {
                    "gte": start,
                    "lte": end,
                    "format": "epoch_millis",
                }
            }
        })
    }

    fn match_clause(field: &str, value: &str, phrase: bool) -> Value {
        let kind = if phrase { "match_phrase" } else { "match" };
        json!({
            kind: {
                field: value,
            }
        })
    }

    fn apply_common(body: &mut Value, req: &SearchRequest) {
        if let Some(highlight) = Self::highlight_argument(req.highlight_field.as_deref()) {
            body["highlight"] = highlight;
        }

        if let Some(source) = Self::source_argument(req.fields.as_deref()) {
            body["_source"] = source;
        }

        if let Some(sort) = Self::sort_argument(req.sort_field.as_deref(), req.sort_order) {
            body["sort"] = sort;
        }
    }

    // Engine default fragment size and tags
    fn highlight_argument(field: Option<&str>) -> Option<Value> {
        let field = non_blank(field)?;
        Some(json!({
            "fields": {
                field: {}
            }
        }))
    }

    fn source_argument(fields: Option<&str>) -> Option<Value> {
        let includes = split_list(non_blank(fields)?);
        if includes.is_empty() {
            return None;
        }
        Some(json!({ "includes": includes }))
    }

    fn sort_argument(field: Option<&str>, order: Option<SortOrder>) -> Option<Value> {
        let field = non_blank(field)?;
        let order = order.unwrap_or_default();
        Some(json!([
            { field: { "order": order.as_str() } }
        ]))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
