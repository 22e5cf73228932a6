// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod backend;
pub mod catalog;
pub mod context;
pub mod ids;
pub mod index;
pub mod search;
pub mod version;
