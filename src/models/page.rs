// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::search::NormalizedHit;
use serde::{Deserialize, Serialize};

/// Maximum number of page links shown by a pager
const WINDOW_SIZE: i64 = 10;
/// Pages shown before the current one when the window is centered
const PAGES_BEFORE: i64 = 4;
/// Pages shown after the current one when the window is centered
const PAGES_AFTER: i64 = 5;

/// One page of search results plus the page-number window for a UI pager.
///
/// Only `page_num`, `page_size`, `total` and `r_list` are inputs; the page count
/// and the inclusive window bounds are derived in [`PageResult::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page_num: u32,
    pub page_size: u32,
    pub total: u64,
    pub r_list: Vec<NormalizedHit>,
    pub page_count: u64,
    pub begin_page_index: u64,
    pub end_page_index: u64,
}

impl PageResult {
    pub fn new(page_num: u32, page_size: u32, total: u64, r_list: Vec<NormalizedHit>) -> Self {
        let page_count = page_count(total, page_size);
        let (begin_page_index, end_page_index) = page_window(page_num, page_count);

        Self {
            page_num,
            page_size,
            total,
            r_list,
            page_count,
            begin_page_index,
            end_page_index,
        }
    }
}

/// `ceil(total / page_size)`, zero when `page_size` is zero
pub fn page_count(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}

/// Inclusive `(begin, end)` page-number window: everything when there are at
/// most ten pages, otherwise four pages before and five after the current one,
/// clamped to the first or last ten pages.
pub fn page_window(page_num: u32, page_count: u64) -> (u64, u64) {
    let count = i64::try_from(page_count).unwrap_or(i64::MAX);
    if count <= WINDOW_SIZE {
        return (1, page_count);
    }

    let current = i64::from(page_num);
    let mut begin = current - PAGES_BEFORE;
    let mut end = current + PAGES_AFTER;

    if begin < 1 {
        begin = 1;
        end = WINDOW_SIZE;
    }

    if end > count {
        end = count;
        begin = count - WINDOW_SIZE + 1;
    }

    // Both bounds are >= 1 here
    (begin as u64, end as u64)
}
