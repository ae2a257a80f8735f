// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};

/// Optional `?type=` query parameter accepted by document routes
#[derive(Debug, Default, Deserialize)]
pub struct DocumentTypeQuery {
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
}

/// Response carrying the effective document ID
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentIdResponse {
    pub id: String,
}

/// Response to a get-by-id call; `source` is the raw JSON source when found
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentSourceResponse {
    pub id: String,
    pub found: bool,
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexExistsResponse {
    pub index: String,
    pub exists: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AcknowledgedResponse {
    pub index: String,
    pub acknowledged: bool,
}
