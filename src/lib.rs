// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Catalog search over a denormalized product index, backed by PostgreSQL or SQLite.

pub mod app;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
