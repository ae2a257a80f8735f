// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use std::env;
use std::str::FromStr;

/// How paged searches translate a request into an engine query.
///
/// Legacy: the assembled filter query is replaced by `match_all` and the page
/// number is sent as the raw offset. This is what existing callers observe.
///
/// Corrected: the filter query is kept and the offset is `(page_num - 1) * page_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PagingMode {
    #[default]
    Legacy,
    Corrected,
}

impl PagingMode {
    /// Read the mode from `PAGING_MODE`, defaulting to legacy when unset
    pub fn from_env() -> anyhow::Result<Self> {
        match env::var("PAGING_MODE") {
            Ok(value) => value.parse(),
            Err(_) => Ok(PagingMode::default()),
        }
    }
}

impl FromStr for PagingMode {
    type Err = anyhow::Error;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "legacy" => Ok(PagingMode::Legacy),
            "corrected" => Ok(PagingMode::Corrected),
            _ => Err(anyhow::anyhow!(
                "PAGING_MODE must be 'legacy' or 'corrected', got: {}",
                mode
            )),
        }
    }
}

impl std::fmt::Display for PagingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PagingMode::Legacy => write!(f, "legacy"),
            PagingMode::Corrected => write!(f, "corrected"),
        }
    }
}
