// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod document;
pub mod engine;
pub mod page;
pub mod paging;
pub mod search;
pub mod version;
