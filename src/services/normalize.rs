// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::engine::EngineHit;
use crate::models::search::NormalizedHit;
use serde_json::Value;

/// Key under which the document ID is injected into each hit
pub const ID_FIELD: &str = "id";

/// Flatten raw hits into field maps, preserving engine order.
///
/// Each map gets the hit ID under `id`. When `highlight_field` is set and a hit
/// carries fragments for it, the field value is replaced by the fragments
/// joined without a delimiter.
pub fn normalize_hits(hits: Vec<EngineHit>, highlight_field: Option<&str>) -> Vec<NormalizedHit> {
    let highlight_field = highlight_field.map(str::trim).filter(|f| !f.is_empty());

    hits.into_iter()
        .map(|hit| normalize_hit(hit, highlight_field))
        .collect()
}

fn normalize_hit(hit: EngineHit, highlight_field: Option<&str>) -> NormalizedHit {
    let EngineHit {
        id,
        mut source,
        highlight,
    } = hit;

    source.insert(ID_FIELD.to_string(), Value::String(id));

    if let Some(field) = highlight_field {
        if let Some(fragments) = highlight.get(field).filter(|f| !f.is_empty()) {
            source.insert(field.to_string(), Value::String(fragments.concat()));
        }
    }

    source
}
