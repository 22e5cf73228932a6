// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod catalog;
pub mod config;
pub mod logging;
pub mod mapper;
pub mod postgres;
pub mod query;
pub mod schema;
pub mod search;
pub mod sqlite;
pub mod strategy;
