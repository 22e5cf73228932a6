// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use std::str::FromStr;

/// Relational engine backing the search index.
///
/// Exactly one backend is active per process; it is chosen at startup from the
/// SEARCH_BACKEND environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBackendKind {
    /// PostgreSQL with tsvector ranking. Production default.
    Postgres,
    /// SQLite with weighted LIKE matching. Used for embedded deployments and tests.
    Sqlite,
}

impl FromStr for SearchBackendKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "postgres" => Ok(SearchBackendKind::Postgres),
            "sqlite" => Ok(SearchBackendKind::Sqlite),
            _ => Err(format!(
                "SEARCH_BACKEND must be 'postgres' or 'sqlite', got: {}",
                value
            )),
        }
    }
}

// Display must match the FromStr spelling so the value round-trips through env/config
impl std::fmt::Display for SearchBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchBackendKind::Postgres => write!(f, "postgres"),
            SearchBackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}
